use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;

use profile_cloud::attributes::MappingPolicy;
use profile_cloud::config::AppConfig;
use profile_cloud::downloader::{attributes_to_json, frequencies_to_csv};
use profile_cloud::error::ProfileError;
use profile_cloud::frequency::word_frequency;
use profile_cloud::loader::load_profile;
use profile_cloud::profile::{CloudKind, ProfileView};

#[derive(Parser, Debug)]
#[command(
    name = "profile-cloud",
    version,
    about = "Render word clouds from a LinkedIn Ad_Targeting.csv export"
)]
struct Cli {
    #[arg(long, global = true, help = "Map the overlapping columns when row lengths differ")]
    best_effort: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write skills.svg and interests.svg and print the basic information
    Render {
        file: PathBuf,
        #[arg(long, default_value = "clouds")]
        out_dir: PathBuf,
        #[arg(long)]
        width: Option<u32>,
        #[arg(long)]
        height: Option<u32>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, help = "Print the profile snapshot as JSON")]
        json: bool,
    },
    /// Print the word counts of one attribute
    Frequencies {
        file: PathBuf,
        #[arg(long, default_value = "Member Skills")]
        attribute: String,
        #[arg(long, help = "Print CSV instead of aligned text")]
        csv: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let mut config = AppConfig::from_env()?;
    if cli.best_effort {
        config.mapping = MappingPolicy::BestEffort;
    }

    match cli.command {
        Commands::Render {
            file,
            out_dir,
            width,
            height,
            seed,
            json,
        } => {
            if let Some(width) = width {
                config.cloud_width = width;
            }
            if let Some(height) = height {
                config.cloud_height = height;
            }
            if let Some(seed) = seed {
                config.cloud.seed = seed;
            }

            let attributes = load_profile(&file, config.mapping)?;
            if json {
                println!("{}", attributes_to_json(&attributes)?);
            }

            let view = ProfileView::build(&attributes, config.cloud_size(), &config.cloud)?;
            for row in &view.basic_info {
                println!("{}: {}", row.label, row.value);
            }
            if !view.job_titles.is_empty() {
                println!("Job Titles: {}", view.job_titles.join(" | "));
            }

            fs::create_dir_all(&out_dir)?;
            let clouds = [
                (CloudKind::Skills, &view.skills_svg),
                (CloudKind::Interests, &view.interests_svg),
            ];
            for (kind, svg) in clouds {
                match svg {
                    Some(svg) => {
                        let path = out_dir.join(format!("{}.svg", kind.name()));
                        fs::write(&path, svg)?;
                        println!("Created {} cloud at {}", kind.name(), path.display());
                    }
                    None => eprintln!(
                        "No {} attribute, skipping {} cloud",
                        kind.attribute(),
                        kind.name()
                    ),
                }
            }
        }
        Commands::Frequencies {
            file,
            attribute,
            csv,
        } => {
            let attributes = load_profile(&file, config.mapping)?;
            let value = attributes
                .get(&attribute)
                .ok_or_else(|| ProfileError::MissingAttribute(attribute.clone()))?;

            let words = word_frequency(&value.items());
            if csv {
                print!("{}", frequencies_to_csv(&words)?);
            } else {
                for word in words {
                    println!("{:<20} {}", word.text, word.value);
                }
            }
        }
    }

    Ok(())
}
