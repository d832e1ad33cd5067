use bee_compress::{create_archive, extract_archive, CompressOptions, FormatVersion};
use std::path::Path;
use std::process;

const USAGE: &str = "usage: bee compress [--v1] <source> <archive>\n       bee extract <archive> <output>";

fn run(args: &[String]) -> bee_compress::Result<()> {
    match args {
        [cmd, rest @ ..] if cmd == "compress" => {
            let (version, paths) = match rest {
                [flag, paths @ ..] if flag == "--v1" => (FormatVersion::Frequency, paths),
                paths => (FormatVersion::Canonical, paths),
            };
            let [source, output] = paths else {
                return Err(bee_compress::Error::invalid(USAGE));
            };
            let stats = create_archive(
                Path::new(source),
                Path::new(output),
                &CompressOptions::new(version),
            )?;
            println!(
                "{} -> {} bytes ({:.1}%, {} symbols)",
                stats.original_size,
                stats.archive_size,
                stats.ratio() * 100.0,
                stats.distinct_symbols
            );
        }
        [cmd, source, output] if cmd == "extract" => {
            let size = extract_archive(Path::new(source), Path::new(output))?;
            println!("restored {} bytes", size);
        }
        _ => return Err(bee_compress::Error::invalid(USAGE)),
    }
    Ok(())
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(err) = run(&args) {
        eprintln!("bee: {}", err);
        process::exit(1);
    }
}
