//! ccext's main application entry point and orchestration logic.
//! Parses arguments, collects the selection, generates the project and
//! runs the follow-up steps.

use std::path::Path;

use ccext::{
    bundled::BundledTemplate,
    cli::{get_args, Args},
    error::{default_error_handler, Result},
    generator::{default_output_dir, ensure_output_dir, Generator},
    logger::init_logger,
    manifest::CollisionPolicy,
    parser::get_answers_from,
    prompt::{collect_selection, DialoguerPrompter},
    steps::{self, Step},
};

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Collects answers from stdin, flags and interactive prompts
/// 2. Checks the output directory
/// 3. Generates the project (materialize template, write descriptors)
/// 4. Initialises git and installs dependencies
fn run(args: Args) -> Result<()> {
    println!("Welcome to ccext, the ClipCC extension generator!");

    let mut preloaded = match get_answers_from(args.stdin)? {
        serde_json::Value::Object(map) => map,
        _ => serde_json::Map::new(),
    };
    preloaded.extend(args.flag_answers());

    let prompt = DialoguerPrompter::new();
    let selection = collect_selection(&prompt, &serde_json::Value::Object(preloaded))?;

    let output_root = args
        .output_dir
        .clone()
        .unwrap_or_else(|| default_output_dir(&selection.metadata));
    let output_root = ensure_output_dir(output_root, args.force)?;

    let policy = if args.strict {
        CollisionPolicy::Reject
    } else {
        CollisionPolicy::LastWins
    };
    // Lives until the end of `run`; dropping it removes the unpacked files.
    let bundled;
    let template_root = match &args.template_dir {
        Some(dir) => dir.clone(),
        None => {
            bundled = BundledTemplate::unpack()?;
            bundled.path().to_path_buf()
        }
    };
    let generator = Generator::new(template_root)?.collision_policy(policy);

    let mut report = |source: &Path, target: &Path| {
        println!("Copied {} -> {}.", source.display(), target.display());
    };
    let generated = generator.generate(&selection, &output_root, &mut report)?;

    let pending: Vec<Step> = generated
        .steps
        .into_iter()
        .filter(|step| !(args.skip_install && matches!(step, Step::Run(_))))
        .collect();
    steps::run(&pending, &output_root, |step| println!("$ {step}"))?;

    println!(
        "Extension project '{}' generated successfully in {}.",
        selection.metadata.name,
        output_root.display()
    );
    Ok(())
}
