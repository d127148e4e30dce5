// Convert HTML to Markdown.
//
//   convert < page.html
//   convert --ref-links a.html b.html
//
// With file arguments each result is preceded by a `<!-- name -->` line.

use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use html_md::{CodeBlockStyle, Engine, Options};

#[derive(Parser)]
#[command(name = "convert")]
#[command(about = "Convert HTML to Markdown")]
struct Args {
    /// HTML files to convert; stdin when none are given
    paths: Vec<PathBuf>,

    /// Write links reference-style with definitions at the end
    #[arg(long)]
    ref_links: bool,

    /// Indent code blocks by four spaces instead of fencing them
    #[arg(long)]
    indented: bool,

    /// Always write `[text](url)`, even when the text is the URL
    #[arg(long)]
    no_autolinks: bool,

    /// Keep images whose source is a `data:` URI
    #[arg(long)]
    keep_data_images: bool,
}

impl Args {
    fn options(&self) -> Options {
        let style = if self.indented {
            CodeBlockStyle::Indented
        } else {
            CodeBlockStyle::Fenced
        };
        Options::new()
            .with_ref_links(self.ref_links)
            .with_code_block_style(style)
            .with_autolinks(!self.no_autolinks)
            .with_keep_data_images(self.keep_data_images)
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    let engine = Engine::new(args.options());

    if args.paths.is_empty() {
        let mut html = String::new();
        io::stdin().read_to_string(&mut html).expect("read stdin");
        println!("{}", engine.convert(&html));
        return ExitCode::SUCCESS;
    }

    let mut files = Vec::with_capacity(args.paths.len());
    for path in &args.paths {
        match std::fs::read_to_string(path) {
            Ok(html) => files.push((path.display().to_string(), html)),
            Err(e) => {
                eprintln!("{}: {e}", path.display());
                return ExitCode::FAILURE;
            }
        }
    }
    for (name, md) in engine.convert_batch(files) {
        println!("<!-- {name} -->\n{md}\n");
    }
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_map_to_options() {
        let args =
            Args::try_parse_from(["convert", "--ref-links", "--indented", "a.html"]).unwrap();
        let options = args.options();
        assert!(options.ref_links);
        assert_eq!(options.code_block_style, CodeBlockStyle::Indented);
        assert!(options.autolinks);
        assert_eq!(args.paths, [PathBuf::from("a.html")]);
    }

    #[test]
    fn defaults_without_flags() {
        let args = Args::try_parse_from(["convert"]).unwrap();
        let options = args.options();
        assert!(!options.ref_links && !options.keep_data_images);
        assert_eq!(options.code_block_style, CodeBlockStyle::Fenced);
        assert!(args.paths.is_empty());
    }

    #[test]
    fn unknown_flag_is_rejected() {
        assert!(Args::try_parse_from(["convert", "--bogus"]).is_err());
    }

    #[test]
    fn no_autolinks_flag() {
        let args =
            Args::try_parse_from(["convert", "--no-autolinks", "--keep-data-images"]).unwrap();
        let options = args.options();
        assert!(!options.autolinks);
        assert!(options.keep_data_images);
    }
}
