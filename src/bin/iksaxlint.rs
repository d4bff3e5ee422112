/*
** This file is a part of Iksax (callback facade for streaming XML engines)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Iksax is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::env;
use std::fs::File;
use std::io::Read;
use std::io::stdin;
use std::process::ExitCode;
use std::rc::Rc;

use iksax::ErrorKind;
use iksax::ParseError;
use iksax::Parser;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

fn print_version() {
    println!("iksaxlint (iksax) v{}", VERSION);
}

fn print_usage() {
    println!(
        concat!(
            "Usage: iksaxlint [OPTIONS] [FILE.xml...]\n",
            "This tool checks the well-formedness of XML documents.\n",
            "Options:\n",
            "  -s, --stat           Overall statistics\n",
            "  -c, --count          Tag counts\n",
            "  -b, --buffer <SIZE>  File read buffer size in bytes (default: {})\n",
            "  -h, --help           Display this help message and exit\n",
            "  -v, --version        Display the version and exit"
        ),
        DEFAULT_BUFFER_SIZE
    );
}

#[derive(Default)]
struct Stats {
    level: usize,
    max_depth: usize,
    nr_tags: usize,
    nr_attributes: usize,
    nr_cdata_size: usize,
    tag_map: BTreeMap<String, usize>,
}

impl Stats {
    fn start_element(&mut self, name: &str, nr_attributes: usize, do_tag_count: bool) {
        self.nr_tags += 1;
        self.nr_attributes += nr_attributes;
        self.level += 1;
        self.max_depth = self.max_depth.max(self.level);
        if do_tag_count {
            *self.tag_map.entry(name.to_string()).or_insert(0) += 1;
        }
    }

    fn end_element(&mut self) {
        self.level = self.level.saturating_sub(1);
    }
}

enum LinterError {
    IoError(std::io::Error),
    BadXml(ParseError),
}

impl From<std::io::Error> for LinterError {
    fn from(err: std::io::Error) -> Self {
        LinterError::IoError(err)
    }
}

struct Linter {
    do_stats: bool,
    do_tag_count: bool,
    buffer_size: usize,
    stats: Rc<RefCell<Stats>>,
    error: Rc<RefCell<Option<ParseError>>>,
    parser: Parser<'static>,
}

impl Linter {
    fn new(do_stats: bool, do_tag_count: bool, buffer_size: usize) -> Self {
        let error = Rc::new(RefCell::new(None));
        let mut parser = Parser::new();
        // Survives the resets between files
        let sink = Rc::clone(&error);
        parser.on_error(move |err: &ParseError| {
            *sink.borrow_mut() = Some(err.clone());
        });
        Linter {
            do_stats,
            do_tag_count,
            buffer_size,
            stats: Rc::new(RefCell::new(Stats::default())),
            error,
            parser,
        }
    }

    fn register(&mut self) {
        let do_tag_count = self.do_tag_count;
        let stats = Rc::clone(&self.stats);
        self.parser.on_start_element(move |name, attributes| {
            stats
                .borrow_mut()
                .start_element(name, attributes.len(), do_tag_count);
        });
        let stats = Rc::clone(&self.stats);
        self.parser
            .on_end_element(move |_| stats.borrow_mut().end_element());
        if self.do_stats {
            let stats = Rc::clone(&self.stats);
            self.parser.on_character_data(move |text| {
                stats.borrow_mut().nr_cdata_size += text.len();
            });
        }
    }

    fn failure(&self) -> LinterError {
        match self.error.borrow_mut().take() {
            Some(err) => LinterError::BadXml(err),
            None => {
                let location = self.parser.location();
                LinterError::BadXml(ParseError {
                    kind: ErrorKind::Unknown,
                    line: location.line,
                    column: location.column,
                    message: ErrorKind::Unknown.description().to_string(),
                })
            }
        }
    }

    fn parse_file(&mut self, file: &str, is_stream: bool) -> Result<(), LinterError> {
        let mut f: Box<dyn Read> = if is_stream {
            Box::new(stdin())
        } else {
            Box::new(File::open(file)?)
        };
        let mut buffer = vec![0u8; self.buffer_size];
        loop {
            let bytes_read = f.read(&mut buffer)?;
            if bytes_read == 0 {
                break;
            }
            if !self.parser.parse(&buffer[..bytes_read], false) {
                return Err(self.failure());
            }
        }
        if !self.parser.parse(b"", true) {
            return Err(self.failure());
        }
        Ok(())
    }

    fn report(&mut self) {
        let mut stats = self.stats.borrow_mut();
        if self.do_stats {
            println!(
                "Tags: {}, attributes: {}, max depth: {}",
                stats.nr_tags, stats.nr_attributes, stats.max_depth
            );
            println!(
                "Total size of character data: {} bytes.",
                stats.nr_cdata_size
            );
        }
        if self.do_tag_count {
            println!("Tag counts:");
            for (tag, count) in stats.tag_map.iter() {
                println!("  {}: {}", tag, count);
            }
        }
        *stats = Stats::default();
    }

    fn lint_file(&mut self, file: &str, is_stream: bool) -> bool {
        self.parser.reset();
        self.register();
        match self.parse_file(file, is_stream) {
            Ok(()) => {
                self.report();
                true
            }
            Err(LinterError::IoError(e)) => {
                eprintln!("Error reading file '{}': {}", file, e);
                false
            }
            Err(LinterError::BadXml(err)) => {
                eprintln!(
                    "Syntax error in file '{}' at line {} column {}: {}",
                    file, err.line, err.column, err.message
                );
                false
            }
        }
    }
}

fn main() -> ExitCode {
    let mut args = env::args();

    let mut files = Vec::new();
    let mut do_stats = false;
    let mut do_tag_count = false;
    let mut buffer_size = DEFAULT_BUFFER_SIZE;

    // Skip the first argument (program name)
    args.next();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-s" | "--stat" => {
                do_stats = true;
            }
            "-c" | "--count" => {
                do_tag_count = true;
            }
            "-cs" | "-sc" => {
                do_stats = true;
                do_tag_count = true;
            }
            "-b" | "--buffer" => match args.next().map(|size| size.parse::<usize>()) {
                Some(Ok(size)) if size > 0 => {
                    buffer_size = size;
                }
                Some(_) => {
                    eprintln!("Invalid buffer size");
                    return ExitCode::FAILURE;
                }
                None => {
                    eprintln!("Missing buffer size");
                    return ExitCode::FAILURE;
                }
            },
            "-h" | "--help" => {
                print_usage();
                return ExitCode::SUCCESS;
            }
            "-v" | "--version" => {
                print_version();
                return ExitCode::SUCCESS;
            }
            _ => {
                files.push(arg);
            }
        }
    }

    let mut linter = Linter::new(do_stats, do_tag_count, buffer_size);
    if files.is_empty() {
        if !linter.lint_file("stdin", true) {
            return ExitCode::FAILURE;
        }
    } else {
        for file in files {
            if !linter.lint_file(&file, false) {
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
