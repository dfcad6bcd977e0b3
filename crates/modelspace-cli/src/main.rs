use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use modelspace_contracts::catalog::{ModelSpace, ModelSpaceSummary};
use modelspace_contracts::invocation::{build_receipt, write_receipt};
use modelspace_contracts::output::OutputKind;
use modelspace_engine::{
    HttpModelSpaceService, InvocationSession, ModelSpaceService, ResultView, ServiceConfig,
    SpaceError,
};
use serde_json::{json, Value};

const EXIT_FAILED: i32 = 1;
const EXIT_INVALID: i32 = 2;

#[derive(Debug, Parser)]
#[command(name = "modelspace", version, about = "Browse model spaces and run predictions")]
struct Cli {
    #[arg(long, global = true)]
    api_base: Option<String>,
    #[arg(long, global = true)]
    timeout: Option<f64>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    List(ListArgs),
    Show(ShowArgs),
    Predict(PredictArgs),
}

#[derive(Debug, Parser)]
struct ListArgs {
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Parser)]
struct ShowArgs {
    id: String,
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Parser)]
struct PredictArgs {
    id: String,
    #[arg(long = "input", value_name = "NAME=VALUE")]
    inputs: Vec<String>,
    #[arg(long = "file", value_name = "NAME=PATH")]
    files: Vec<String>,
    #[arg(long)]
    events: Option<PathBuf>,
    #[arg(long)]
    receipt: Option<PathBuf>,
    #[arg(long)]
    download: Option<PathBuf>,
    #[arg(long)]
    json: bool,
}

fn main() {
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("modelspace error: {err:#}");
            std::process::exit(EXIT_FAILED);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    let config = ServiceConfig::from_env()
        .with_api_base(cli.api_base.as_deref())
        .with_timeout(cli.timeout);
    let service = HttpModelSpaceService::new(&config)?;
    match cli.command {
        Command::List(args) => run_list(&service, args),
        Command::Show(args) => run_show(&service, args),
        Command::Predict(args) => run_predict(&service, args),
    }
}

fn run_list(service: &dyn ModelSpaceService, args: ListArgs) -> Result<i32> {
    let models = service.list_models()?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&models)?);
    } else {
        print!("{}", format_model_list(&models));
    }
    Ok(0)
}

fn run_show(service: &dyn ModelSpaceService, args: ShowArgs) -> Result<i32> {
    let model = service.get_model(&args.id)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&model)?);
    } else {
        print!("{}", format_model_detail(&model));
    }
    Ok(0)
}

fn run_predict(service: &HttpModelSpaceService, args: PredictArgs) -> Result<i32> {
    let mut session = InvocationSession::load(service, &args.id, args.events.as_deref())?;

    let mut field_failures = Vec::new();
    for raw in &args.inputs {
        let (name, value) = parse_assignment(raw)?;
        if let Err(err) = session.set_text(name, value) {
            field_failures.push(err);
        }
    }
    for raw in &args.files {
        let (name, path) = parse_assignment(raw)?;
        if let Err(err) = session.set_file(name, Path::new(path)) {
            field_failures.push(err);
        }
    }
    for warning in session.warnings() {
        eprintln!("warning: {warning}");
    }
    if !field_failures.is_empty() {
        for err in &field_failures {
            eprintln!("{err}");
        }
        return Ok(EXIT_FAILED);
    }

    let request = session.values().clone();
    let submitted = session.submit(service).map(|_| ());
    let receipt = build_receipt(
        &session.model().id,
        session.descriptors(),
        &request,
        session.last_result().filter(|_| submitted.is_ok()),
        submitted.as_ref().err().map(ToString::to_string).as_deref(),
    );
    if let Some(path) = &args.receipt {
        write_receipt(path, &receipt)
            .with_context(|| format!("failed to write receipt {}", path.display()))?;
    }

    let code = match &submitted {
        Ok(()) => 0,
        Err(SpaceError::Validation(missing)) => {
            eprintln!("{}", format_missing_fields(&session, &missing.names));
            return Ok(EXIT_INVALID);
        }
        Err(_) => EXIT_FAILED,
    };

    let view = session.view();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&view_json(&view))?);
    } else {
        print!("{}", format_view(&view));
    }

    if let Some(dir) = &args.download {
        if view.stale {
            eprintln!("skipping downloads: outputs are from an earlier attempt");
        } else {
            for output in &view.outputs {
                if let OutputKind::Image { url } = &output.kind {
                    let path = service.download_output(&output.key, url, dir)?;
                    eprintln!("saved {} to {}", output.key, path.display());
                }
            }
        }
    }
    Ok(code)
}

fn parse_assignment(raw: &str) -> Result<(&str, &str)> {
    let Some((name, value)) = raw.split_once('=') else {
        bail!("expected NAME=VALUE, got '{raw}'");
    };
    let name = name.trim();
    if name.is_empty() {
        bail!("missing field name in '{raw}'");
    }
    Ok((name, value))
}

fn format_model_list(models: &[ModelSpaceSummary]) -> String {
    if models.is_empty() {
        return "No model spaces found.\n".to_string();
    }
    let width = models.iter().map(|model| model.id.len()).max().unwrap_or(0);
    let mut out = String::new();
    for model in models {
        let _ = write!(out, "{:<width$}  {}", model.id, model.name);
        if let Some(description) = model.description.as_deref().filter(|d| !d.trim().is_empty()) {
            let _ = write!(out, "  ({})", description.trim());
        }
        out.push('\n');
    }
    out
}

fn format_model_detail(model: &ModelSpace) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} [{}]", model.name, model.id);
    if let Some(description) = model.description.as_deref().filter(|d| !d.trim().is_empty()) {
        let _ = writeln!(out, "{}", description.trim());
    }
    if model.inputs.is_empty() {
        let _ = writeln!(out, "\nNo inputs.");
        return out;
    }
    let _ = writeln!(out, "\nInputs:");
    for field in &model.inputs {
        let mut tags = vec![field.kind.as_str().to_string()];
        if field.required {
            tags.push("required".to_string());
        }
        if field.is_fallback() {
            tags.push(format!("unrecognized '{}'", field.raw_kind));
        }
        let accept = field.kind.accept_mime_types();
        if !accept.is_empty() {
            tags.push(format!("accepts {}", accept.join(", ")));
        }
        let _ = writeln!(out, "  {} ({}): {}", field.name, tags.join("; "), field.label);
    }
    out
}

fn format_missing_fields(session: &InvocationSession, names: &[String]) -> String {
    let mut out = String::from("missing required fields:");
    for name in names {
        let label = session
            .descriptor(name)
            .map(|field| field.label.as_str())
            .filter(|label| *label != name.as_str());
        match label {
            Some(label) => {
                let _ = write!(out, "\n  {name}: {label}");
            }
            None => {
                let _ = write!(out, "\n  {name}");
            }
        }
    }
    out
}

fn format_view(view: &ResultView) -> String {
    let mut out = String::new();
    if let Some(error) = &view.error {
        let _ = writeln!(out, "Error: {error}");
    }
    if view.outputs.is_empty() {
        if view.error.is_none() {
            let _ = writeln!(out, "Output: (empty result)");
        }
        return out;
    }
    if view.stale {
        let _ = writeln!(out, "Output (stale, from the previous successful run):");
    } else {
        let _ = writeln!(out, "Output:");
    }
    for output in &view.outputs {
        match &output.kind {
            OutputKind::Image { url } => {
                let _ = writeln!(out, "{}: [image] {url}", output.key);
            }
            OutputKind::Data { formatted } => {
                let _ = writeln!(out, "{}:", output.key);
                for line in formatted.lines() {
                    let _ = writeln!(out, "  {line}");
                }
            }
        }
    }
    out
}

fn view_json(view: &ResultView) -> Value {
    json!({
        "state": view.state.as_str(),
        "stale": view.stale,
        "error": view.error,
        "outputs": view.outputs,
    })
}

#[cfg(test)]
mod tests {
    use modelspace_contracts::catalog::{ModelSpace, ModelSpaceSummary};
    use modelspace_contracts::output::classify_result;
    use modelspace_contracts::schema::{FieldDescriptor, FieldKind};
    use modelspace_engine::{InvocationSession, InvocationState, ResultView};
    use serde_json::{json, Map};

    use super::{
        format_missing_fields, format_model_detail, format_model_list, format_view,
        parse_assignment, view_json,
    };

    fn model() -> ModelSpace {
        ModelSpace {
            id: "sdxl".to_string(),
            name: "Stable Diffusion XL".to_string(),
            description: Some("Text to image".to_string()),
            avatar: None,
            inputs: vec![
                FieldDescriptor::new("prompt", FieldKind::Text, true).with_label("Prompt"),
                FieldDescriptor::new("image", FieldKind::FileImage, false),
            ],
            extra: Map::new(),
        }
    }

    #[test]
    fn assignments_split_on_first_equals() -> anyhow::Result<()> {
        assert_eq!(parse_assignment("prompt=a=b")?, ("prompt", "a=b"));
        assert_eq!(parse_assignment(" steps =")?, ("steps", ""));
        assert!(parse_assignment("prompt").is_err());
        assert!(parse_assignment("=value").is_err());
        Ok(())
    }

    #[test]
    fn view_renders_image_and_data_blocks() {
        let result = json!({"url": "https://x/y.png", "meta": {"score": 0.87}});
        let view = ResultView {
            state: InvocationState::Succeeded,
            outputs: classify_result(result.as_object().unwrap_or(&Map::new())),
            stale: false,
            error: None,
        };
        let text = format_view(&view);
        assert_eq!(
            text,
            "Output:\nurl: [image] https://x/y.png\nmeta:\n  {\n    \"score\": 0.87\n  }\n"
        );

        let rendered = view_json(&view);
        assert_eq!(rendered["outputs"][0]["kind"], json!("image"));
        assert_eq!(rendered["outputs"][0]["url"], json!("https://x/y.png"));
        assert_eq!(rendered["outputs"][1]["kind"], json!("data"));
    }

    #[test]
    fn failed_view_flags_stale_output() {
        let result = json!({"caption": "old"});
        let view = ResultView {
            state: InvocationState::Failed,
            outputs: classify_result(result.as_object().unwrap_or(&Map::new())),
            stale: true,
            error: Some("predict failed: predict request failed (500): boom".to_string()),
        };
        let text = format_view(&view);
        assert!(text.starts_with("Error: predict failed"));
        assert!(text.contains("Output (stale, from the previous successful run):"));

        let empty = ResultView {
            state: InvocationState::Succeeded,
            outputs: Vec::new(),
            stale: false,
            error: None,
        };
        assert_eq!(format_view(&empty), "Output: (empty result)\n");
    }

    #[test]
    fn catalog_listing_and_detail_formatting() {
        let models = vec![
            ModelSpaceSummary {
                id: "sdxl".to_string(),
                name: "Stable Diffusion XL".to_string(),
                avatar: None,
                description: Some("images".to_string()),
            },
            ModelSpaceSummary {
                id: "whisper-large".to_string(),
                name: "Whisper".to_string(),
                avatar: None,
                description: None,
            },
        ];
        assert_eq!(
            format_model_list(&models),
            "sdxl           Stable Diffusion XL  (images)\nwhisper-large  Whisper\n"
        );
        assert_eq!(format_model_list(&[]), "No model spaces found.\n");

        let detail = format_model_detail(&model());
        assert!(detail.contains("  prompt (text; required): Prompt"));
        assert!(detail.contains("  image (file-image; accepts image/jpeg, image/jpg, image/png): image"));
    }

    #[test]
    fn missing_fields_show_labels() {
        let session = InvocationSession::new(model());
        let text = format_missing_fields(&session, &["prompt".to_string(), "image".to_string()]);
        assert_eq!(text, "missing required fields:\n  prompt: Prompt\n  image");
    }
}
