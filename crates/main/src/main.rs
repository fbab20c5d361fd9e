use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::info;
use pdf_facade::{
    Document, EngineBuilder, FontStyle, HorizontalAlignment, Orientation, Output, PageSize,
    ResponseSink, TextBlock,
};

/// Builds a document from the command line and routes it to a destination.
///
/// Fonts must be present under `assets/fonts` relative to the `pdf_facade`
/// crate or provided via the `PDF_FACADE_FONTS_DIR` environment variable.
#[derive(Parser)]
#[command(author, version, about = "Render a document and deliver it to a destination")]
struct Cli {
    /// Destination code: D (download), F (file), I (inline), S (string); F combines with one other.
    #[arg(short, long, default_value = "F")]
    dest: String,

    /// File name used by the F, D and I destinations.
    #[arg(short, long, default_value = "document.pdf")]
    name: String,

    /// Directory the F destination writes into.
    #[arg(short, long, default_value = ".")]
    path: PathBuf,

    #[arg(long)]
    title: Option<String>,

    #[arg(long)]
    author: Option<String>,

    #[arg(long)]
    subject: Option<String>,

    #[arg(long)]
    creator: Option<String>,

    /// Keyword; repeat for several.
    #[arg(short, long = "keyword")]
    keywords: Vec<String>,

    /// Custom property as KEY=VALUE; repeat for several.
    #[arg(long = "property", value_parser = parse_property)]
    properties: Vec<(String, String)>,

    /// Paragraph of text; repeat for several.
    #[arg(short, long = "text")]
    texts: Vec<String>,

    /// Start a new page before every paragraph.
    #[arg(long)]
    page_per_text: bool,

    #[arg(long, value_enum, default_value_t = Align::Left)]
    align: Align,

    #[arg(long, value_enum, default_value_t = Paper::A4)]
    paper: Paper,

    #[arg(long)]
    landscape: bool,

    /// Font size in points for the paragraphs.
    #[arg(long)]
    font_size: Option<u8>,

    #[arg(long)]
    bold: bool,

    /// Encode metadata as Unicode.
    #[arg(long)]
    utf8: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Align {
    Left,
    Center,
    Right,
    Justified,
}

impl From<Align> for HorizontalAlignment {
    fn from(align: Align) -> Self {
        match align {
            Align::Left => HorizontalAlignment::Left,
            Align::Center => HorizontalAlignment::Center,
            Align::Right => HorizontalAlignment::Right,
            Align::Justified => HorizontalAlignment::Justified,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Paper {
    A3,
    A4,
    A5,
    Legal,
    Letter,
}

impl From<Paper> for PageSize {
    fn from(paper: Paper) -> Self {
        match paper {
            Paper::A3 => PageSize::A3,
            Paper::A4 => PageSize::A4,
            Paper::A5 => PageSize::A5,
            Paper::Legal => PageSize::Legal,
            Paper::Letter => PageSize::Letter,
        }
    }
}

fn parse_property(value: &str) -> Result<(String, String), String> {
    value
        .split_once('=')
        .map(|(key, value)| (key.to_owned(), value.to_owned()))
        .filter(|(key, _)| !key.is_empty())
        .ok_or_else(|| format!("expected KEY=VALUE, got `{value}`"))
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("Error: {}", err);
        print_error_sources(err.as_ref());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let orientation = if cli.landscape {
        Orientation::Landscape
    } else {
        Orientation::Portrait
    };
    let engine = EngineBuilder::new()
        .with_paper_size(cli.paper.into())
        .with_orientation(orientation)
        .build()?;

    let mut document = Document::new(engine)
        .with_utf8(cli.utf8)
        .with_name(cli.name)
        .with_path(cli.path);

    if let Some(title) = cli.title {
        document = document.with_title(title);
    }
    if let Some(author) = cli.author {
        document = document.with_author(author);
    }
    if let Some(subject) = cli.subject {
        document = document.with_subject(subject);
    }
    if let Some(creator) = cli.creator {
        document = document.with_creator(creator);
    }
    if !cli.keywords.is_empty() {
        document = document.with_keywords(&cli.keywords);
    }
    if !cli.properties.is_empty() {
        document = document.with_custom_properties(cli.properties);
    }

    let style = if cli.bold {
        FontStyle::Bold
    } else {
        FontStyle::Regular
    };
    document = document.with_font("", style, cli.font_size)?;

    for (index, text) in cli.texts.into_iter().enumerate() {
        if index == 0 || cli.page_per_text {
            document = document.with_page();
        }
        document = document.with_text(TextBlock::new(text).with_alignment(cli.align.into()));
    }

    match document.output(&cli.dest, ResponseSink)? {
        Output::Written(true) => {
            info!("document written");
            println!("Generated {}", document.file_path().display());
        }
        Output::Written(false) => println!("Nothing to do for destination `{}`", cli.dest),
        Output::Bytes(bytes) => io::stdout().write_all(&bytes)?,
        Output::Response(response) => {
            println!("{:?}", response.status());
            for (name, value) in response.headers() {
                println!("{}: {}", name, value.to_str().unwrap_or("<binary>"));
            }
            println!("({} bytes body)", response.body().len());
        }
    }

    Ok(())
}

fn print_error_sources(mut error: &(dyn Error + 'static)) {
    while let Some(source) = error.source() {
        eprintln!("  caused by: {}", source);
        error = source;
    }
}
