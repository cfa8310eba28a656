use std::process::ExitCode;

use clap::Parser;

/// Generate a 500-page sample PDF (output.pdf) from the images in ./images
#[derive(Parser)]
#[command(name = "generate-pdf", version, about, long_about = None)]
struct Cli {}

fn main() -> ExitCode {
    Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let result = std::env::current_dir()
        .map_err(sampledoc::Error::Io)
        .and_then(|root| sampledoc::generate_pdf(&root));

    match result {
        Ok(generated) => {
            println!(
                "Successfully generated {}-page PDF file: {}",
                generated.pages,
                generated.path.display()
            );
            println!("File size: {:.2} MB", generated.size_mib());
            println!(
                "Each page contains one of {} rotating sample images",
                sampledoc::IMAGE_FILES.len()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error generating PDF: {e}");
            ExitCode::FAILURE
        }
    }
}
