use std::path::PathBuf;

use stubgen_compiler::diagnostics::render_error;
use stubgen_compiler::{Config, MetadataReader, Sentinel, render_unit};

pub struct RenderArgs {
    pub descriptor: PathBuf,
    pub sentinel: Sentinel,
    pub include_protected: bool,
    pub color: bool,
}

pub fn run(args: RenderArgs) {
    let config = Config::new()
        .sentinel(args.sentinel)
        .include_protected(args.include_protected)
        .colored(args.color);

    let metadata = match MetadataReader::new(&config).read(&args.descriptor) {
        Ok(metadata) => metadata,
        Err(e) => {
            eprintln!("{}", render_error(&e, args.color));
            std::process::exit(1);
        }
    };

    // Warnings go to stderr so stdout stays a valid unit.
    eprint!("{}", metadata.diagnostics.render());
    print!("{}", render_unit(&metadata, &config));
}
