use std::path::PathBuf;

use nodegen::output::Destination;
use nodegen::{Config, Registry};

#[derive(argh::FromArgs)]
/// Generate Flow node declarations and a builder wrapper from a node registry.
struct Args {
    /// path to the registry JSON
    #[argh(positional)]
    registry: PathBuf,

    /// destination of the declarations, or `-` for stdout
    #[argh(positional)]
    declarations: String,

    /// destination of the wrapper module, or `-` for stdout
    #[argh(positional)]
    wrapper: String,
}

macro_rules! bail {
    ($($tt:tt)*) => {
        eprintln!($($tt)*);
        ::std::process::exit(1);
    };
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let args: Args = argh::from_env();
    if let Err(err) = run(args) {
        bail!("error: {err}");
    }
}

fn run(args: Args) -> nodegen::Result<()> {
    let registry = Registry::load(&args.registry)?;
    let generated = nodegen::generate(&registry, &Config::default())?;

    let outputs = [
        (Destination::from(args.declarations.as_str()), &generated.declarations),
        (Destination::from(args.wrapper.as_str()), &generated.wrapper),
    ];
    for (destination, text) in outputs {
        destination.write(text)?;
        if let Destination::File(path) = &destination {
            println!("{} -> {}", args.registry.display(), path.display());
        }
    }

    Ok(())
}
