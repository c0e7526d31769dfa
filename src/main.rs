use photo_gallery::{config, source, Gallery, GalleryConfig, Library, MemoryStore, View};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

const USAGE: &str = "\
Usage: photo-gallery [OPTIONS] <payload.json>

Options:
  --query <text>          Filter photos by title
  --page <n>              Page to show (clamped into range)
  --detail <id>           Show one photo with its neighbours and album
  --annotate <id>=<text>  Save a description for a photo
  --upload <title>=<url>  Add a local upload
  --config <path>         Settings file (default: user config dir)
  --db <path>             Catalog database (default: user data dir)
  --memory                Keep annotations and uploads in memory only";

/// Parsed command-line flags
struct Flags {
    query: Option<String>,
    page: Option<usize>,
    detail: Option<String>,
    annotate: Option<(String, String)>,
    upload: Option<(String, String)>,
    config_path: Option<PathBuf>,
    db_path: Option<PathBuf>,
    memory: bool,
    payload: PathBuf,
}

/// `Ok(None)` asks for the usage text
fn parse_flags(mut args: pico_args::Arguments) -> Result<Option<Flags>, pico_args::Error> {
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let annotate = args.opt_value_from_fn("--annotate", split_pair)?;
    let upload = args.opt_value_from_fn("--upload", split_pair)?;

    let mut flags = Flags {
        query: args.opt_value_from_str("--query")?,
        page: args.opt_value_from_str("--page")?,
        detail: args.opt_value_from_str("--detail")?,
        annotate,
        upload,
        config_path: args.opt_value_from_str("--config")?,
        db_path: args.opt_value_from_str("--db")?,
        memory: args.contains("--memory"),
        payload: PathBuf::new(),
    };

    let leftover = args.finish();
    // Anything flag-like still here is unknown or misspelled
    let unknown: Vec<String> = leftover
        .iter()
        .map(|arg| arg.to_string_lossy().into_owned())
        .filter(|arg| arg.starts_with('-'))
        .collect();
    if !unknown.is_empty() {
        return Err(pico_args::Error::UnusedArgsLeft(unknown));
    }

    let mut positional = leftover.into_iter();
    let Some(payload) = positional.next() else {
        return Ok(None);
    };
    let extra: Vec<String> = positional
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();
    if !extra.is_empty() {
        return Err(pico_args::Error::UnusedArgsLeft(extra));
    }
    flags.payload = PathBuf::from(payload);
    Ok(Some(flags))
}

/// Split `key=value`, keeping any further `=` in the value
fn split_pair(arg: &str) -> Result<(String, String), String> {
    arg.split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected <key>=<value>, got '{arg}'"))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let flags = match parse_flags(pico_args::Arguments::from_env()) {
        Ok(Some(flags)) => flags,
        Ok(None) => {
            println!("{USAGE}");
            return Ok(());
        }
        Err(e) => {
            eprintln!("❌ {e}\n\n{USAGE}");
            std::process::exit(2);
        }
    };

    let settings = match &flags.config_path {
        Some(path) => config::load_from_path(path)?,
        None => config::load(),
    };

    if flags.memory {
        run(&flags, &settings, MemoryStore::new())
    } else {
        let library = match flags.db_path.as_ref().or(settings.database_path.as_ref()) {
            Some(path) => Library::open(path)?,
            None => Library::new()?,
        };
        run(&flags, &settings, library)
    }
}

fn run<S: photo_gallery::KeyValueStore>(
    flags: &Flags,
    settings: &GalleryConfig,
    store: S,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut gallery = Gallery::open(settings, store);

    gallery.begin_fetch();
    match std::fs::read_to_string(&flags.payload)
        .map_err(photo_gallery::GalleryError::from)
        .and_then(|json| source::parse_payload(&json))
    {
        Ok(items) => gallery.replace_remote_items(items),
        Err(e) => gallery.fail_fetch(e.to_string()),
    }

    if let Some((title, url)) = &flags.upload {
        if gallery.add_local_item(photo_gallery::PhotoItem::local(title.as_str(), url.as_str())) {
            info!("📸 Added local upload: {}", title);
        }
    }
    if let Some((id, text)) = &flags.annotate {
        gallery.save_annotation(id, text);
        info!("📝 Saved description for photo #{}", id);
    }

    if let Some(id) = &flags.detail {
        match gallery.detail(id) {
            Some(detail) => {
                println!("Photo #{}: {}", detail.photo.photo.id, detail.photo.photo.description);
                println!("  {}", detail.photo.photo.full_url);
                println!(
                    "  {}",
                    detail
                        .photo
                        .annotation
                        .as_deref()
                        .unwrap_or("No description available.")
                );
                if let Some(prev) = &detail.previous_id {
                    println!("  previous: #{prev}");
                }
                if let Some(next) = &detail.next_id {
                    println!("  next: #{next}");
                }
                for related in &detail.related {
                    println!("  related: #{} {}", related.id, related.description);
                }
            }
            None => println!("No photo with id {id}"),
        }
        return Ok(());
    }

    if let Some(query) = &flags.query {
        gallery.set_query(query.as_str());
    }
    if let Some(page) = flags.page {
        gallery.set_page(page);
    }

    print_view(&gallery.view());
    Ok(())
}

fn print_view(view: &View) {
    if let Some(error) = view.status.error() {
        println!("❌ {error}");
        return;
    }
    if view.is_empty() {
        println!("No photos found");
        return;
    }

    for item in &view.items {
        let note = item
            .annotation
            .as_deref()
            .unwrap_or("No description available.");
        println!("#{:<8} {}", item.photo.id, item.photo.description);
        println!("          {note}");
    }
    println!("{} ({} photos)", view.label(), view.total_count);
}
