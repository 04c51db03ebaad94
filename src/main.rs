use serde_json::{Value, from_str};
use std::env;
use std::fs;
use zpt::{ZptError, ZptRenderer};

/// A simple CLI to render a page template against a JSON model.
fn main() -> Result<(), ZptError> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let html = args.iter().any(|arg| arg == "--html");
    let paths: Vec<&String> = args.iter().skip(1).filter(|arg| *arg != "--html").collect();
    if paths.is_empty() || paths.len() > 2 {
        eprintln!("Renders a Zope page template to standard output.");
        eprintln!();
        eprintln!("Usage: {} <path/to/template> [path/to/model.json] [--html]", args[0]);
        eprintln!();
        eprintln!("The model is available to the template as `here`; the members of");
        eprintln!("a JSON object are also passed as keyword options.");
        std::process::exit(1);
    }

    let model: Value = match paths.get(1) {
        Some(path) => {
            log::info!("Loading model from {}", path);
            from_str(&fs::read_to_string(path)?)?
        }
        None => Value::Object(Default::default()),
    };

    let builder = if html {
        ZptRenderer::builder().html()
    } else {
        ZptRenderer::builder()
    };
    let renderer = builder.build();
    log::info!("Rendering {}", paths[0]);
    let output = renderer.render_file(paths[0], &model)?;
    println!("{}", output);
    Ok(())
}
