//! Binary entry point: read an archive, recompress every entry, write it back
//! out to a fixed path.

use std::time::Instant;

use dbpf_recompress::cli::args::{parse, Args};
use dbpf_recompress::config::OUTPUT_PATH;
use dbpf_recompress::driver::{recompress_pack, resolve_nb_workers};
use dbpf_recompress::displaylevel;
use dbpf_recompress::{PackageReader, PackageWriter};

fn main() {
    let args = match parse() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("{}: {}", dbpf_recompress::cli::constants::PROGRAM_NAME, e);
            std::process::exit(1);
        }
    };

    if args.exit_early {
        std::process::exit(0);
    }

    std::process::exit(run(args));
}

fn run(args: Args) -> i32 {
    let start = Instant::now();

    let raw = match std::fs::read(&args.input_path) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("failed to read {}: {}", args.input_path, e);
            return 1;
        }
    };

    let pack = match PackageReader::read(&raw) {
        Ok(pack) => pack,
        Err(e) => {
            eprintln!("failed to parse {}: {:?}", args.input_path, e);
            return 1;
        }
    };
    displaylevel!(2, "read {} entries from {}", pack.entries.len(), args.input_path);

    let nb_workers = resolve_nb_workers(args.nb_workers);
    displaylevel!(3, "using {} worker thread(s)", nb_workers);

    let pack = recompress_pack(pack, nb_workers);

    let image = PackageWriter::write(pack);
    if let Err(e) = std::fs::write(OUTPUT_PATH, &image) {
        eprintln!("failed to write {}: {}", OUTPUT_PATH, e);
        return 1;
    }

    displaylevel!(
        1,
        "wrote {} ({} bytes) in {:.2}s",
        OUTPUT_PATH,
        image.len(),
        start.elapsed().as_secs_f64()
    );

    0
}
