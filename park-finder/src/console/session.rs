//! The interactive session loop.

use std::io::{self, Write};

use crate::cache::CacheStore;
use crate::domain::{RegionDirectory, Site};
use crate::nps::{NpsError, PageSource, SiteIndex};
use crate::places::{self, PlacesError, PlacesLookup};

use super::command::Command;

const RULE: &str =
    "----------------------------------------------------------------------";

const REGION_PROMPT: &str =
    "Enter a state or territory name (e.g. Michigan), \"help\" for examples, or \"exit\": ";

const SITE_PROMPT: &str =
    "Enter a site number for nearby places, \"back\" for regions, or \"exit\": ";

/// Errors that abort the console session.
///
/// The caller saves the cache before reporting any of these; a session
/// that dies on a network error still keeps what it fetched.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Nps(#[from] NpsError),

    #[error(transparent)]
    Places(#[from] PlacesError),

    #[error("input error: {0}")]
    Io(#[from] io::Error),
}

/// Whether the session continues after a sub-prompt.
enum Flow {
    Continue,
    Quit,
}

type InputLines = io::Lines<io::StdinLock<'static>>;

/// One interactive session: the region directory, the two resolvers, and
/// the cache they share.
pub struct Session<'a, S, P> {
    index: SiteIndex<S>,
    places: P,
    directory: RegionDirectory,
    cache: &'a mut CacheStore,
}

impl<'a, S: PageSource, P: PlacesLookup> Session<'a, S, P> {
    /// Assemble a session. The directory is built by the caller so that a
    /// startup failure is distinguishable from a mid-session one.
    pub fn new(
        index: SiteIndex<S>,
        places: P,
        directory: RegionDirectory,
        cache: &'a mut CacheStore,
    ) -> Self {
        Self {
            index,
            places,
            directory,
            cache,
        }
    }

    /// Run the prompt loop until the user exits or input ends.
    pub async fn run(&mut self) -> Result<(), AppError> {
        let mut lines = io::stdin().lines();

        println!("Welcome to the protected-area site finder!");

        loop {
            let Some(line) = prompt(&mut lines, REGION_PROMPT)? else {
                return Ok(());
            };

            match Command::parse(&line) {
                Command::Exit => return Ok(()),
                Command::Help => self.print_examples(),
                Command::Back | Command::Pick(_) => {
                    println!("Pick a region first, e.g. \"Michigan\".");
                }
                Command::Name(name) => {
                    if let Flow::Quit = self.browse_region(&mut lines, &name).await? {
                        return Ok(());
                    }
                }
            }
        }
    }

    /// Resolve a region name (confirming a probable abbreviation first),
    /// list its sites, then run the site-selection prompt.
    async fn browse_region(
        &mut self,
        lines: &mut InputLines,
        input: &str,
    ) -> Result<Flow, AppError> {
        let mut name = RegionDirectory::normalize(input);

        if self.directory.get(&name).is_none()
            && let Some(full) = self.directory.match_abbreviation(&name)
        {
            let full = full.to_string();
            let question = format!(
                "You typed \"{}\", did you mean {}? [y/N] ",
                name.to_uppercase(),
                title_case(&full)
            );
            let Some(answer) = prompt(lines, &question)? else {
                return Ok(Flow::Quit);
            };
            if matches!(answer.trim().to_lowercase().as_str(), "y" | "ye" | "yes") {
                name = full;
            }
        }

        let Some(region_url) = self.directory.get(&name).map(str::to_string) else {
            println!("That doesn't appear to be a state or territory. Please try again.");
            return Ok(Flow::Continue);
        };

        let sites = self
            .index
            .sites_for_region(self.cache, &region_url)
            .await?;

        println!("{RULE}");
        println!("Sites in {}", title_case(&name));
        println!("{RULE}");
        for (i, site) in sites.iter().enumerate() {
            println!("[{}] {}", i + 1, site.summary());
        }

        loop {
            let Some(line) = prompt(lines, SITE_PROMPT)? else {
                return Ok(Flow::Quit);
            };

            match Command::parse(&line) {
                Command::Exit => return Ok(Flow::Quit),
                Command::Back => return Ok(Flow::Continue),
                Command::Help => {
                    println!("Enter a number between 1 and {}.", sites.len());
                }
                Command::Pick(n) if (1..=sites.len()).contains(&n) => {
                    self.show_nearby(&sites[n - 1]).await?;
                }
                Command::Pick(_) => {
                    println!("Out of range. Enter a number between 1 and {}.", sites.len());
                }
                Command::Name(_) => {
                    println!("Enter a number from the list above, \"back\", or \"exit\".");
                }
            }
        }
    }

    async fn show_nearby(&mut self, site: &Site) -> Result<(), AppError> {
        let found = places::nearby(&self.places, self.cache, site).await?;

        println!("{RULE}");
        println!("Places near {}", site.name);
        println!("{RULE}");
        if found.is_empty() {
            println!("No nearby places found.");
        }
        for place in &found {
            println!("{}", place.summary());
        }

        Ok(())
    }

    fn print_examples(&self) {
        let examples: Vec<String> = self
            .directory
            .names()
            .take(4)
            .map(title_case)
            .collect();
        println!(
            "Examples of regions include: {} and many more...",
            examples.join(", ")
        );
    }
}

/// Print a prompt without a newline and read one line.
/// Returns `None` when input ends.
fn prompt(lines: &mut InputLines, text: &str) -> io::Result<Option<String>> {
    print!("{text}");
    io::stdout().flush()?;
    lines.next().transpose()
}

/// Title-case a lower-cased region name for display.
fn title_case(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
