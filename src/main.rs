//! Command-line entry point for annotrack.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use annotrack::annotation::{AnnotatedChain, AnnotationRegistry};
use annotrack::color::Rgb;
use annotrack::encode::RangeEncoder;
use annotrack::layout::{LayoutEngine, SvgCanvas};
use annotrack::modification::LigandCache;
use annotrack::options::Options;
use annotrack::provider::{DocumentProvider, StructureProvider};
use annotrack::residue::NumberingScheme;
use annotrack::segment::SegmentedSequence;
use annotrack::AnnotError;

struct Args {
    document: PathBuf,
    structure_id: String,
    chain_id: String,
    out_dir: PathBuf,
    options: Option<String>,
}

const PRESET_DIR: &str = "presets";

impl Args {
    fn parse() -> Option<Self> {
        let mut args = std::env::args().skip(1);
        let document = PathBuf::from(args.next()?);
        let structure_id = args.next()?;
        let chain_id = args.next()?;
        let out_dir = args.next().map_or_else(|| PathBuf::from("."), PathBuf::from);
        let options = args.next();
        Some(Self {
            document,
            structure_id,
            chain_id,
            out_dir,
            options,
        })
    }
}

fn file_name(kind: &str) -> String {
    let stem: String = kind
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    format!("{stem}.json")
}

fn segmented(
    annotated: Arc<AnnotatedChain>,
    width: usize,
    scheme: NumberingScheme,
) -> Result<SegmentedSequence, AnnotError> {
    match SegmentedSequence::new(Arc::clone(&annotated), width, scheme) {
        Err(AnnotError::SchemeUnavailable { chain_id, scheme }) => {
            log::warn!("chain {chain_id} has no {scheme} numbering, using SEQRES");
            SegmentedSequence::new(annotated, width, NumberingScheme::Seqres)
        }
        other => other,
    }
}

/// Options from a TOML path, or from a preset name under `presets/`.
fn resolve_options(arg: Option<&str>) -> Result<Options, AnnotError> {
    let Some(arg) = arg else {
        return Ok(Options::default());
    };
    let path = Path::new(arg);
    if path.exists() {
        return Options::load(path);
    }
    let dir = Path::new(PRESET_DIR);
    let presets = Options::list_presets(dir);
    if presets.iter().any(|name| name == arg) {
        log::info!("using options preset {arg}");
        return Options::load(&dir.join(format!("{arg}.toml")));
    }
    Err(AnnotError::NotFound(format!(
        "options file or preset {arg} (presets: {})",
        presets.join(", ")
    )))
}

fn run(args: &Args) -> Result<(), AnnotError> {
    let options = resolve_options(args.options.as_deref())?;
    let provider: Arc<dyn StructureProvider> =
        Arc::new(DocumentProvider::load(&args.document)?);
    let registry =
        AnnotationRegistry::with_defaults(Arc::new(LigandCache::new()));
    let annotated = Arc::new(AnnotatedChain::load(
        &provider,
        &registry,
        &args.structure_id,
        &args.chain_id,
    )?);

    let seq = segmented(
        Arc::clone(&annotated),
        options.layout.segment_width,
        options.layout.scheme,
    )?;
    log::info!(
        "{} chain {}: {} residues in {} segments ({})",
        args.structure_id,
        args.chain_id,
        seq.len(),
        seq.segment_count(),
        seq.scheme()
    );

    let engine = LayoutEngine::new(&options, &registry);
    let mut canvas =
        SvgCanvas::new(engine.image_size(&seq), Rgb::new(255, 255, 255));
    let report = engine.render(&seq, &mut canvas);
    for skipped in &report.skipped {
        log::warn!("track skipped: {skipped}");
    }
    std::fs::create_dir_all(&args.out_dir)?;
    write(&args.out_dir.join("tracks.svg"), &canvas.finish())?;
    log::info!(
        "drew {} fragments on {}x{}",
        report.fragments,
        report.size.x,
        report.size.y
    );

    options.save(&args.out_dir.join("options.toml"))?;
    let schema = serde_json::to_string_pretty(&Options::json_schema())?;
    write(&args.out_dir.join("options.schema.json"), &schema)?;

    let encoder = RangeEncoder::new(engine.palette().clone(), seq.scheme());
    for kind in registry.kinds() {
        let track = encoder.encode_kind(kind.name(), [annotated.as_ref()]);
        if track.is_empty() {
            continue;
        }
        write(&args.out_dir.join(file_name(kind.name())), &track.to_json_string()?)?;
    }
    Ok(())
}

fn write(path: &Path, content: &str) -> Result<(), AnnotError> {
    std::fs::write(path, content)?;
    log::info!("wrote {}", path.display());
    Ok(())
}

fn main() {
    env_logger::init();

    let Some(args) = Args::parse() else {
        log::error!(
            "Usage: annotrack <document.json> <structure> <chain> [out_dir] [options.toml | preset]"
        );
        std::process::exit(1);
    };

    if let Err(e) = run(&args) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_come_from_a_path_or_fall_back_to_defaults() {
        assert_eq!(resolve_options(None).unwrap(), Options::default());
        let dir = std::env::temp_dir()
            .join(format!("annotrack-cli-{}", std::process::id()));
        let path = dir.join("narrow.toml");
        let mut opts = Options::default();
        opts.layout.segment_width = 30;
        opts.save(&path).unwrap();
        let loaded = resolve_options(path.to_str()).unwrap();
        assert_eq!(loaded.layout.segment_width, 30);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn unknown_preset_is_not_found() {
        assert!(matches!(
            resolve_options(Some("no-such-preset")),
            Err(AnnotError::NotFound(_))
        ));
    }

    #[test]
    fn kind_names_become_file_names() {
        assert_eq!(file_name("Cross-link"), "cross_link.json");
        assert_eq!(file_name("Disulfide bond"), "disulfide_bond.json");
    }
}
