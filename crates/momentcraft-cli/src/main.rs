//! MomentCraft CLI
//!
//! Thin wrapper around momentcraft-core for command-line usage. Form
//! input, message rendering, clipboard access and the login gates live
//! here; all data operations live in the core.
//!
//! ## Usage
//!
//! ```bash
//! # Create a gift and get its share URL
//! momentcraft gift create --recipient Dina --sender Alice \
//!     --message "Happy Birthday!" --moment Birthday
//!
//! # Start a collaborative gift (requires account login)
//! momentcraft account login
//! momentcraft gift collab --sender Alice --message "From all of us" --moment Farewell
//!
//! # Add a letter through a collaboration link
//! momentcraft gift join "<link>" --sender Bob --message "Good luck!"
//!
//! # Pick customizations for the next gift
//! momentcraft select effect hearts
//! momentcraft select music default_2
//!
//! # Administer the catalogs
//! momentcraft admin login admin admin123
//! momentcraft admin music add --title "Our Song" --artist "The Band" song.mp3
//! momentcraft admin dashboard
//! ```

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use momentcraft_core::upload::format_file_size;
use momentcraft_core::{
    default_backgrounds, default_effects, default_music_tracks, CraftError, GiftDraft, GiftId,
    GiftRecord, LetterDraft, ShareTarget, Studio, Upload, FONT_COLORS,
};

/// MomentCraft - digital gift cards
#[derive(Parser)]
#[command(name = "momentcraft")]
#[command(version = "0.1.0")]
#[command(about = "MomentCraft - digital gift cards")]
#[command(
    long_about = "Create personalized digital gift cards, share them through links, collect collaborator letters, and administer the music, effect and background catalogs."
)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Data directory (default: ~/.momentcraft/data)
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Base URL for generated share links
    #[arg(long, global = true)]
    share_base: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create, join, inspect and share gifts
    Gift {
        #[command(subcommand)]
        action: GiftAction,
    },

    /// Pick customizations for the gift being composed
    Select {
        #[command(subcommand)]
        action: SelectAction,
    },

    /// Browse the music, effect and background catalogs
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },

    /// End-user account management
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },

    /// Administration (requires admin login)
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum GiftAction {
    /// Create a gift and print its share URL
    Create {
        /// Recipient's name
        #[arg(long)]
        recipient: String,
        /// Your name
        #[arg(long)]
        sender: String,
        /// The gift message
        #[arg(long)]
        message: String,
        /// Moment category, e.g. Birthday
        #[arg(long)]
        moment: String,
        /// Photo to attach (compressed before storage)
        #[arg(long)]
        photo: Option<PathBuf>,
    },
    /// Start a collaborative gift and print the collaboration link
    Collab {
        /// Your name
        #[arg(long)]
        sender: String,
        /// Your letter
        #[arg(long)]
        message: String,
        /// Moment category, e.g. Birthday
        #[arg(long)]
        moment: String,
        /// Recipient's name (optional for collaborative gifts)
        #[arg(long)]
        recipient: Option<String>,
        /// Photo to attach
        #[arg(long)]
        photo: Option<PathBuf>,
    },
    /// Add your letter to an existing gift via its collaboration link
    Join {
        /// Collaboration link (or a bare gift id)
        link: String,
        /// Your name
        #[arg(long)]
        sender: String,
        /// Your letter
        #[arg(long)]
        message: String,
        /// Photo to attach
        #[arg(long)]
        photo: Option<PathBuf>,
    },
    /// Show a gift with all collaborator letters
    Show {
        /// Gift id or share link
        target: String,
    },
    /// List all gifts
    List,
    /// Re-copy the most recently generated share URL
    Share,
}

#[derive(Subcommand)]
enum SelectAction {
    /// Pick a music track from the library by id
    Music {
        /// Library track id (see `catalog music`)
        id: String,
    },
    /// Upload your own audio file as the gift's music
    MusicFile {
        /// Audio file (max 10 MB)
        file: PathBuf,
    },
    /// Pick a visual effect by id
    Effect {
        /// Effect id, or "none"
        id: String,
    },
    /// Pick a background by id
    Background {
        /// Background id
        id: String,
    },
    /// Pick a font color by id
    FontColor {
        /// Color id (see `select show`)
        id: String,
    },
    /// Show the in-progress selections
    Show,
    /// Clear all selections, starting a fresh creation session
    Clear,
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Music library available in the creation flow
    Music,
    /// Effects available in the creation flow
    Effects,
    /// Backgrounds available in the creation flow
    Backgrounds,
}

#[derive(Subcommand)]
enum AccountAction {
    /// Register a new account (logs you in)
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Log in
    Login,
    /// Show login state
    Status,
}

#[derive(Subcommand)]
enum AdminAction {
    /// Log in as administrator
    Login { username: String, password: String },
    /// Log out
    Logout,
    /// Overview stats and recent activity
    Dashboard,
    /// Music management
    Music {
        #[command(subcommand)]
        action: AdminMusicAction,
    },
    /// Effects management
    Effects {
        #[command(subcommand)]
        action: AdminVisualAction,
    },
    /// Background management
    Backgrounds {
        #[command(subcommand)]
        action: AdminVisualAction,
    },
    /// User management
    Users {
        #[command(subcommand)]
        action: AdminUsersAction,
    },
    /// Gifts moderation
    Gifts {
        #[command(subcommand)]
        action: AdminGiftsAction,
    },
}

#[derive(Subcommand)]
enum AdminMusicAction {
    /// Upload a music track
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        artist: String,
        /// Audio file (max 10 MB)
        file: PathBuf,
    },
    /// List all tracks
    List,
    /// Delete an uploaded track
    Remove { id: String },
}

#[derive(Subcommand)]
enum AdminVisualAction {
    /// Upload an image
    Add {
        #[arg(long)]
        name: String,
        /// Image file (max 2 MB, downsampled before storage)
        file: PathBuf,
    },
    /// List all items
    List,
    /// Delete an item
    Remove { id: String },
}

#[derive(Subcommand)]
enum AdminUsersAction {
    /// List registered users
    List,
    /// Delete a user by email
    Remove { email: String },
}

#[derive(Subcommand)]
enum AdminGiftsAction {
    /// List all gifts
    List,
    /// Delete a gift
    Delete { id: String },
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();
}

/// Get the default data directory (~/.momentcraft/data)
fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".momentcraft")
        .join("data")
}

/// Resolve a gift id from either a bare id or a share link
fn parse_gift_target(input: &str) -> Result<GiftId> {
    let target = ShareTarget::parse(input).map_err(notice)?;
    Ok(target.gift_id().clone())
}

/// MIME type from the file extension, standing in for the type a
/// browser upload control reports.
fn guess_content_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("ogg") => "audio/ogg",
        Some("m4a") => "audio/mp4",
        Some("flac") => "audio/flac",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    }
}

fn read_upload(path: &Path) -> Result<Upload> {
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload")
        .to_string();
    Ok(Upload::new(file_name, guess_content_type(path), bytes))
}

/// Copy a URL to the clipboard, best effort. A missing clipboard is a
/// cancellation, not an error - the URL is on screen either way.
fn copy_link(url: &str) {
    match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(url.to_string())) {
        Ok(()) => println!("  (copied to clipboard)"),
        Err(_) => println!("  (clipboard unavailable - copy the URL manually)"),
    }
}

/// Convert core errors into the human-readable notices the UI shows.
fn notice(err: CraftError) -> anyhow::Error {
    match err {
        CraftError::GiftNotFound(_) => {
            anyhow::anyhow!("Gift not found. The link may no longer be valid.")
        }
        CraftError::QuotaExceeded { .. } => anyhow::anyhow!(
            "Storage full! Delete old gifts or catalog items, or use a smaller file."
        ),
        CraftError::OversizeFile { size, limit } => anyhow::anyhow!(
            "File too large: {} (limit {}).",
            format_file_size(size),
            format_file_size(limit)
        ),
        CraftError::UnsupportedFormat(mime) => {
            anyhow::anyhow!("Unsupported file format: {}.", mime)
        }
        CraftError::DuplicateEmail(email) => anyhow::anyhow!(
            "Email {} is already registered. Use another email or log in.",
            email
        ),
        CraftError::Validation(field) => {
            anyhow::anyhow!("Please fill in the {} before submitting.", field)
        }
        CraftError::InvalidLink(reason) => {
            anyhow::anyhow!("That does not look like a gift link ({}).", reason)
        }
        CraftError::InvalidGiftId(id) => anyhow::anyhow!("Invalid gift id: {}.", id),
        other => anyhow::Error::new(other),
    }
}

fn require_user_login(studio: &Studio, feature: &str) -> Result<()> {
    if studio.user_logged_in()? {
        Ok(())
    } else {
        bail!(
            "Login required for {}. Run `momentcraft account login` first.",
            feature
        )
    }
}

fn require_admin(studio: &Studio) -> Result<()> {
    if studio.is_admin()? {
        Ok(())
    } else {
        bail!("Admin access required. Run `momentcraft admin login` first.")
    }
}

fn format_date(date: &chrono::DateTime<chrono::Utc>) -> String {
    date.format("%b %e, %Y %H:%M").to_string()
}

fn attach_optional_photo(studio: &Studio, photo: Option<PathBuf>) -> Result<Option<String>> {
    match photo {
        Some(path) => {
            let upload = read_upload(&path)?;
            Ok(Some(studio.attach_photo(&upload).map_err(notice)?))
        }
        None => Ok(None),
    }
}

fn print_gift(id: &GiftId, record: &GiftRecord) {
    println!("Gift {}", id);
    if let Some(recipient) = &record.recipient_name {
        println!("  For:     {}", recipient);
    }
    println!("  From:    {}", record.sender_name);
    println!("  Moment:  {}", record.moment_type);
    println!("  Message: {}", record.message);
    println!(
        "  Theme:   effect={} background={} font={}",
        record.effect_id, record.background_id, record.font_color_id
    );
    if let Some(music) = &record.music_selection {
        println!("  Music:   {}", music.display_name());
    }
    if record.image_data.is_some() {
        println!("  Photo:   attached");
    }
    println!("  Created: {}", format_date(&record.created_at));
    if record.collaborators.is_empty() {
        println!("  Letters: 1 (no collaborators yet)");
    } else {
        println!("  Letters: {}", record.letter_count());
        for (index, letter) in record.collaborators.iter().enumerate() {
            println!(
                "    {}. {} - {} ({})",
                index + 1,
                letter.sender_name,
                letter.message,
                format_date(&letter.created_at)
            );
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let data_dir = cli.data_dir.unwrap_or_else(default_data_dir);
    let studio = match cli.share_base {
        Some(base) => Studio::with_share_base(&data_dir, base)?,
        None => Studio::new(&data_dir)?,
    };

    match cli.command {
        Commands::Gift { action } => match action {
            GiftAction::Create {
                recipient,
                sender,
                message,
                moment,
                photo,
            } => {
                let image_data = attach_optional_photo(&studio, photo)?;
                let created = studio
                    .create_gift(GiftDraft {
                        recipient_name: Some(recipient),
                        sender_name: sender,
                        message,
                        moment_type: moment,
                        image_data,
                    })
                    .map_err(notice)?;

                println!("Gift created!");
                println!("  ID:  {}", created.id);
                println!("  URL: {}", created.url);
                copy_link(&created.url);
            }

            GiftAction::Collab {
                sender,
                message,
                moment,
                recipient,
                photo,
            } => {
                require_user_login(&studio, "Collaboration")?;
                let image_data = attach_optional_photo(&studio, photo)?;
                let created = studio
                    .start_collaboration(GiftDraft {
                        recipient_name: recipient,
                        sender_name: sender,
                        message,
                        moment_type: moment,
                        image_data,
                    })
                    .map_err(notice)?;

                println!("Collaboration link created! Share it so others can add their letters:");
                println!("  ID:   {}", created.id);
                println!("  Link: {}", created.url);
                copy_link(&created.url);
            }

            GiftAction::Join {
                link,
                sender,
                message,
                photo,
            } => {
                let id = parse_gift_target(&link)?;
                let ctx = studio.collaboration_context(&id).map_err(notice)?;
                println!(
                    "Joining a {} gift (theme: {} on {})",
                    ctx.moment_type, ctx.effect_id, ctx.background_id
                );

                let image_data = attach_optional_photo(&studio, photo)?;
                let url = studio
                    .add_letter(
                        &id,
                        LetterDraft {
                            sender_name: sender,
                            message,
                            image_data,
                        },
                    )
                    .map_err(notice)?;

                println!("Letter added!");
                println!("  Gift URL: {}", url);
                copy_link(&url);
            }

            GiftAction::Show { target } => {
                let id = parse_gift_target(&target)?;
                let record = studio.gift(&id).map_err(notice)?;
                print_gift(&id, &record);
            }

            GiftAction::List => {
                let gifts = studio.list_gifts()?;
                if gifts.is_empty() {
                    println!("No gifts yet.");
                } else {
                    println!("{} gift(s):", gifts.len());
                    for (id, record) in &gifts {
                        println!(
                            "  {}  {} -> {}  [{}]  {} letter(s)",
                            id,
                            record.sender_name,
                            record.recipient_name.as_deref().unwrap_or("-"),
                            record.moment_type,
                            record.letter_count()
                        );
                    }
                }
            }

            GiftAction::Share => match studio.last_gift_url()? {
                Some(url) => {
                    println!("  URL: {}", url);
                    copy_link(&url);
                }
                None => println!("No gift has been shared yet."),
            },
        },

        Commands::Select { action } => match action {
            SelectAction::Music { id } => {
                require_user_login(&studio, "Music")?;
                match studio.select_music_from_library(&id).map_err(notice)? {
                    Some(selection) => println!("Music selected: {}", selection.display_name()),
                    None => bail!(
                        "No music track with id '{}'. Run `momentcraft catalog music` to see the library.",
                        id
                    ),
                }
            }

            SelectAction::MusicFile { file } => {
                require_user_login(&studio, "Music")?;
                let upload = read_upload(&file)?;
                let selection = studio.select_music_upload(&upload).map_err(notice)?;
                println!("Music selected: {}", selection.display_name());
            }

            SelectAction::Effect { id } => {
                require_user_login(&studio, "Effect")?;
                let known = id == "none"
                    || default_effects().iter().any(|e| e.id == id)
                    || studio.store().effect_library()?.iter().any(|e| e.id == id);
                if !known {
                    bail!("No effect with id '{}'. Run `momentcraft catalog effects`.", id);
                }
                studio.select_effect(&id)?;
                println!("Effect selected: {}", id);
            }

            SelectAction::Background { id } => {
                require_user_login(&studio, "Effect")?;
                let known = default_backgrounds().iter().any(|b| b.id == id)
                    || studio.store().background_library()?.iter().any(|b| b.id == id);
                if !known {
                    bail!(
                        "No background with id '{}'. Run `momentcraft catalog backgrounds`.",
                        id
                    );
                }
                studio.select_background(&id)?;
                println!("Background selected: {}", id);
            }

            SelectAction::FontColor { id } => {
                require_user_login(&studio, "Effect")?;
                let Some(color) = momentcraft_core::font_color(&id) else {
                    let ids: Vec<&str> = FONT_COLORS.iter().map(|c| c.id).collect();
                    bail!("No font color '{}'. Available: {}", id, ids.join(", "));
                };
                studio.select_font_color(color.id)?;
                println!("Font color selected: {} ({})", color.name, color.value);
            }

            SelectAction::Show => {
                let store = studio.store();
                println!("In-progress selections:");
                println!(
                    "  Effect:     {}",
                    store.selected_effect()?.as_deref().unwrap_or("(none)")
                );
                println!(
                    "  Background: {}",
                    store.selected_background()?.as_deref().unwrap_or("(none)")
                );
                println!(
                    "  Font color: {}",
                    store.selected_font_color()?.as_deref().unwrap_or("(none)")
                );
                match store.selected_music()? {
                    Some(music) => println!("  Music:      {}", music.display_name()),
                    None => println!("  Music:      (none)"),
                }
            }

            SelectAction::Clear => {
                studio.begin_creation_session()?;
                println!("Selections cleared - ready for a new gift.");
            }
        },

        Commands::Catalog { action } => match action {
            CatalogAction::Music => {
                println!("Music library:");
                for entry in studio.store().music_library()? {
                    let tag = if entry.is_default { "Default" } else { "Admin Library" };
                    println!("  {:<24} {:<32} [{}]", entry.id, entry.name, tag);
                }
            }

            CatalogAction::Effects => {
                println!("Effects:");
                for effect in default_effects() {
                    println!("  {:<24} {:<32} [Default]", effect.id, effect.name);
                }
                for entry in studio.store().effect_library()? {
                    println!("  {:<24} {:<32} [Admin Library]", entry.id, entry.name);
                }
            }

            CatalogAction::Backgrounds => {
                println!("Backgrounds:");
                for background in default_backgrounds() {
                    println!("  {:<24} {:<32} [Default]", background.id, background.name);
                }
                for entry in studio.store().background_library()? {
                    println!("  {:<24} {:<32} [Admin Library]", entry.id, entry.name);
                }
            }
        },

        Commands::Account { action } => match action {
            AccountAction::Register {
                name,
                email,
                password,
            } => {
                studio
                    .register_user(&name, &email, &password)
                    .map_err(notice)?;
                println!("Account created! You are now logged in.");
            }

            AccountAction::Login => {
                studio.log_in_user()?;
                println!("Welcome! You are now logged in.");
            }

            AccountAction::Status => {
                println!(
                    "User:  {}",
                    if studio.user_logged_in()? { "logged in" } else { "not logged in" }
                );
                if studio.is_admin()? {
                    let username = studio.admin_username()?;
                    println!("Admin: {}", username.as_deref().unwrap_or("Administrator"));
                } else {
                    println!("Admin: not logged in");
                }
            }
        },

        Commands::Admin { action } => match action {
            AdminAction::Login { username, password } => {
                if studio.admin_login(&username, &password)? {
                    println!("Admin login successful.");
                } else {
                    bail!("Invalid username or password!");
                }
            }

            AdminAction::Logout => {
                studio.admin_logout()?;
                println!("Admin logged out.");
            }

            AdminAction::Dashboard => {
                require_admin(&studio)?;
                let stats = studio.dashboard_stats()?;
                println!(
                    "Dashboard ({})",
                    studio.admin_username()?.unwrap_or_else(|| "Administrator".to_string())
                );
                println!("  Users:       {}", stats.users);
                println!("  Gifts:       {}", stats.gifts);
                println!("  Music:       {}", stats.music);
                println!("  Effects:     {}", stats.effects);
                println!("  Backgrounds: {}", stats.backgrounds);

                let recent = studio.recent_activity(10)?;
                if recent.is_empty() {
                    println!("No recent activity");
                } else {
                    println!("Recent activity:");
                    for (_, gift) in &recent {
                        println!(
                            "  {} created a gift for {} ({})",
                            gift.sender_name,
                            gift.recipient_name.as_deref().unwrap_or("-"),
                            format_date(&gift.created_at)
                        );
                    }
                }
            }

            AdminAction::Music { action } => {
                require_admin(&studio)?;
                match action {
                    AdminMusicAction::Add { title, artist, file } => {
                        let upload = read_upload(&file)?;
                        let track = studio.add_music(&title, &artist, &upload).map_err(notice)?;
                        println!("Music added successfully! (id: {})", track.id);
                    }
                    AdminMusicAction::List => {
                        for track in studio.store().list_music()? {
                            let tag = if track.is_default {
                                "System".to_string()
                            } else {
                                track.id.clone()
                            };
                            println!(
                                "  {:<28} {:<20} {:<40} [{}]",
                                track.title,
                                track.artist,
                                track.file_name.as_deref().unwrap_or("Uploaded File"),
                                tag
                            );
                        }
                    }
                    AdminMusicAction::Remove { id } => {
                        if default_music_tracks().iter().any(|m| m.id == id) {
                            bail!("System tracks cannot be deleted.");
                        }
                        studio.remove_music(&id).map_err(notice)?;
                        println!("Music track removed.");
                    }
                }
            }

            AdminAction::Effects { action } => {
                require_admin(&studio)?;
                match action {
                    AdminVisualAction::Add { name, file } => {
                        let upload = read_upload(&file)?;
                        let effect = studio.add_effect(&name, &upload).map_err(notice)?;
                        println!("Effect added successfully! (id: {})", effect.id);
                    }
                    AdminVisualAction::List => {
                        for effect in studio.store().list_effects()? {
                            let tag = if effect.is_default { "System" } else { "Uploaded" };
                            println!("  {:<24} {:<24} [{}]", effect.id, effect.name, tag);
                        }
                    }
                    AdminVisualAction::Remove { id } => {
                        if default_effects().iter().any(|e| e.id == id) {
                            bail!("System effects cannot be deleted.");
                        }
                        studio.remove_effect(&id).map_err(notice)?;
                        println!("Effect removed.");
                    }
                }
            }

            AdminAction::Backgrounds { action } => {
                require_admin(&studio)?;
                match action {
                    AdminVisualAction::Add { name, file } => {
                        let upload = read_upload(&file)?;
                        let background = studio.add_background(&name, &upload).map_err(notice)?;
                        println!("Background added successfully! (id: {})", background.id);
                    }
                    AdminVisualAction::List => {
                        for background in studio.store().list_backgrounds()? {
                            let tag = if background.is_default { "System" } else { "Uploaded" };
                            println!("  {:<24} {:<24} [{}]", background.id, background.name, tag);
                        }
                    }
                    // Unlike music and effects, background removal is
                    // unconditional - system entries included.
                    AdminVisualAction::Remove { id } => {
                        studio.remove_background(&id).map_err(notice)?;
                        println!("Background removed.");
                    }
                }
            }

            AdminAction::Users { action } => {
                require_admin(&studio)?;
                match action {
                    AdminUsersAction::List => {
                        let users = studio.users()?;
                        if users.is_empty() {
                            println!("No registered users found");
                        } else {
                            for user in &users {
                                let gifts = studio.gifts_by_sender(&user.name)?;
                                println!(
                                    "  {:<20} {:<32} registered {}  {} gift(s)",
                                    user.name,
                                    user.email,
                                    format_date(&user.registered_date),
                                    gifts
                                );
                            }
                        }
                    }
                    AdminUsersAction::Remove { email } => {
                        studio.remove_user(&email)?;
                        println!("User removed.");
                    }
                }
            }

            AdminAction::Gifts { action } => {
                require_admin(&studio)?;
                match action {
                    AdminGiftsAction::List => {
                        let gifts = studio.list_gifts()?;
                        if gifts.is_empty() {
                            println!("No gifts found");
                        } else {
                            for (id, record) in &gifts {
                                println!(
                                    "  {}  {} -> {}  [{}]  {} letter(s)  {}",
                                    id,
                                    record.sender_name,
                                    record.recipient_name.as_deref().unwrap_or("N/A"),
                                    record.moment_type,
                                    record.letter_count(),
                                    format_date(&record.created_at)
                                );
                            }
                        }
                    }
                    AdminGiftsAction::Delete { id } => {
                        let id = GiftId::parse(&id).map_err(notice)?;
                        studio.delete_gift(&id)?;
                        println!("Gift deleted.");
                    }
                }
            }
        },
    }

    Ok(())
}
