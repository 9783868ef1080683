//! bizcard - command-line front end of the digital business card.
//!
//! Subcommands:
//! - vcard: generate the contact file (the "save contact" button)
//! - card: print the card with its contact actions
//! - legal: print imprint, privacy notice or acquisition profile
//! - image: manage uploaded profile/logo images
//! - share: print the share text

use bizcard_core::actions::{contact_actions, share_text};
use bizcard_core::i18n::{language_option, translations};
use bizcard_core::image::{select_profile_image, HttpImageResolver, ImageReference};
use bizcard_core::legal::{render, LegalDocument};
use bizcard_core::profile::{builtin_profile, load_profile, present, ProfileRecord};
use bizcard_core::shell::ContactSaver;
use bizcard_core::storage::{ImageSlot, JsonFileStore, UploadedImages};
use bizcard_core::vcard::{DirectorySink, DownloadSink, StdoutSink};
use bizcard_core::{observability, Config, Language};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "bizcard", version, about = "Digital business card")]
struct Cli {
    /// JSON configuration file.
    #[arg(long, global = true, env = "BIZCARD_CONFIG")]
    config: Option<PathBuf>,
    /// Profile JSON file (overrides the configured one).
    #[arg(long, global = true)]
    profile: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate the contact file.
    Vcard {
        #[arg(long)]
        lang: Option<Language>,
        /// Photo reference (URL, path or data URL) instead of the configured one.
        #[arg(long, conflicts_with = "no_photo")]
        image: Option<String>,
        #[arg(long, default_value_t = false)]
        no_photo: bool,
        #[arg(long, default_value_t = false)]
        include_phone: bool,
        /// Output directory.
        #[arg(long, conflicts_with = "stdout")]
        out: Option<PathBuf>,
        #[arg(long, default_value_t = false)]
        stdout: bool,
    },
    /// Print the card and its contact actions.
    Card {
        #[arg(long)]
        lang: Option<Language>,
    },
    /// Print a legal document (imprint, privacy, acquisition).
    Legal {
        document: LegalDocument,
        #[arg(long)]
        lang: Option<Language>,
    },
    /// Manage uploaded images.
    Image {
        #[command(subcommand)]
        command: ImageCommands,
    },
    /// Print the text shared with the card link.
    Share {
        #[arg(long, default_value = "")]
        url: String,
    },
}

#[derive(Subcommand, Debug)]
enum ImageCommands {
    Set { slot: ImageSlot, file: PathBuf },
    Clear { slot: ImageSlot },
    Show,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    observability::init_tracing(&config.observability);

    let profile = match cli.profile.as_ref().or(config.profile_path.as_ref()) {
        Some(path) => load_profile(path)?,
        None => builtin_profile().clone(),
    };
    let default_lang = config.vcard.default_language;
    let uploads = UploadedImages::with_config(
        JsonFileStore::new(config.images.store_path.clone()),
        &config.images,
    );

    match cli.command {
        Commands::Vcard {
            lang,
            image,
            no_photo,
            include_phone,
            out,
            stdout,
        } => {
            let reference = if no_photo {
                None
            } else if let Some(raw) = image.as_deref() {
                ImageReference::parse(raw)
            } else {
                let uploaded = uploads.get_or_skip(ImageSlot::Profile);
                select_profile_image(
                    uploaded.as_deref(),
                    [
                        config.images.profile_image.as_deref(),
                        profile.profile_image.as_deref(),
                    ],
                )
            };

            let sink: Arc<dyn DownloadSink> = if stdout {
                Arc::new(StdoutSink)
            } else {
                Arc::new(DirectorySink::new(
                    out.unwrap_or_else(|| config.output.dir.clone()),
                ))
            };
            let resolver = Arc::new(HttpImageResolver::new(&config.fetch)?);
            let saver = ContactSaver::new(Arc::new(profile), resolver, sink)
                .with_phone(include_phone || config.vcard.include_phone);

            let report = saver
                .save_contact(lang.unwrap_or(default_lang), reference.as_ref())
                .await?;
            let summary = match &report.location {
                Some(path) => format!("saved {} ({} bytes)", path.display(), report.bytes),
                None => format!("wrote {} ({} bytes)", report.filename, report.bytes),
            };
            let photo = if report.photo_embedded { "with photo" } else { "without photo" };
            if stdout {
                eprintln!("{}, {}", summary, photo);
            } else {
                println!("{}, {}", summary, photo);
            }
        }
        Commands::Card { lang } => print_card(&profile, lang.unwrap_or(default_lang)),
        Commands::Legal { document, lang } => {
            print!("{}", render(document, &profile, lang.unwrap_or(default_lang)));
        }
        Commands::Image { command } => match command {
            ImageCommands::Set { slot, file } => {
                let image = uploads.upload_file(slot, &file)?;
                println!(
                    "stored {} image ({}, {} base64 chars)",
                    slot,
                    image.mime_subtype,
                    image.base64_data.len()
                );
            }
            ImageCommands::Clear { slot } => {
                uploads.clear(slot)?;
                println!("cleared {} image", slot);
            }
            ImageCommands::Show => {
                for slot in ImageSlot::ALL {
                    let state = match uploads.reference(slot)? {
                        Some(ImageReference::Embedded { mime_subtype, data }) => {
                            format!("{} ({} base64 chars)", mime_subtype, data.len())
                        }
                        Some(ImageReference::Remote { locator }) => locator,
                        None => "-".to_string(),
                    };
                    println!("{}\t{}\t{}", slot, uploads.key(slot), state);
                }
            }
        },
        Commands::Share { url } => println!("{}", share_text(&profile, &url)),
    }

    Ok(())
}

fn print_card(profile: &ProfileRecord, lang: Language) {
    let t = translations(lang);
    let option = language_option(lang);

    println!("[{} {}]", option.flag, option.language.code().to_uppercase());
    println!("{}", profile.full_name());
    if let Some(title) = profile.title.resolve(lang) {
        println!("{}", title);
    }
    if let Some(org) = present(profile.organization.as_deref()) {
        println!("{}", org);
    }
    println!();
    println!("[{}]", t.save_contact);
    for action in contact_actions(profile, lang) {
        println!("{}\t{}", action.label, action.href);
    }
    println!();
    println!("{} | {} | {}", t.imprint, t.privacy, t.acquisition_profile);
}
