//! The `/profile` slash command.
//!
//! Replies with a summary embed for the subject user plus two buttons, then
//! answers button clicks with ephemeral detail views (registered vehicles,
//! or police records + tickets + license status) for a 60-second window.

use std::time::Duration;

use anyhow::{Context as _, Result};
use serenity::all::{
    ButtonStyle, Colour, CommandInteraction, CommandOptionType, ComponentInteraction, Context,
    CreateActionRow, CreateButton, CreateCommand, CreateCommandOption, CreateEmbed,
    CreateInteractionResponse, CreateInteractionResponseMessage, EditInteractionResponse,
    ResolvedValue, User,
};
use serenity::futures::StreamExt;
use tracing::{debug, error, warn};

use super::types::ProfileButton;
use crate::records::{LicenseEntry, PoliceRecord, RecordStore, TicketRecord, VehicleRecord};

/// How long the buttons keep answering after the summary reply.
const COLLECT_WINDOW: Duration = Duration::from_secs(60);

/// Shown in place of the summary when the window closes without any clicks.
const EXPIRY_NOTICE: &str = "No interaction received.";

/// Ephemeral reply when a single click cannot be answered.
const CLICK_FAILURE: &str = "Couldn't render that view. Try again.";

const NO_VEHICLES: &str = "No vehicles registered.";
const NO_ARRESTS: &str = "No arrests found.";
const NO_TICKETS: &str = "No tickets found.";
const NO_LICENSE: &str = "No license records found.";

const SUMMARY_COLOUR: Colour = Colour::new(0x89_CFF0);
const VEHICLES_COLOUR: Colour = Colour::new(0x2B_2D31);
const POLICE_COLOUR: Colour = Colour::new(0xFF_0000);

/// Record state captured at invocation time.
///
/// Tickets are deliberately absent: they are re-read from disk on every
/// click so recent writes show up.
struct ProfileSnapshot {
    vehicles: Vec<VehicleRecord>,
    police_records: Vec<PoliceRecord>,
    license_status: String,
}

impl ProfileSnapshot {
    fn load(store: &RecordStore, user_id: u64) -> Result<Self> {
        let vehicles = store
            .vehicles(user_id)
            .context("Failed to load vehicle records")?;
        let police_records = store
            .police_records(user_id)
            .context("Failed to load police records")?;
        let licenses = store
            .licenses(user_id)
            .context("Failed to load license records")?;

        Ok(Self {
            vehicles,
            police_records,
            license_status: license_status(&licenses),
        })
    }
}

/// Builds the `/profile` slash command definition.
#[must_use]
pub fn register() -> CreateCommand {
    CreateCommand::new("profile")
        .description("Displays your or another user's profile.")
        .add_option(CreateCommandOption::new(
            CommandOptionType::User,
            "user",
            "Select a user to view their profile. If not selected, shows your profile.",
        ))
}

/// Executes the `/profile` command.
///
/// Returns once the button window has expired. Failures before the summary
/// reply propagate to the dispatcher; failures inside a click are answered
/// with their own ephemeral error reply and do not close the window.
pub async fn run(ctx: &Context, store: &RecordStore, command: &CommandInteraction) -> Result<()> {
    let subject = resolve_subject(command);
    let subject_id = subject.id;

    debug!("Rendering profile for {} ({})", subject.tag(), subject_id);

    let snapshot = ProfileSnapshot::load(store, subject_id.get())?;

    let embed = CreateEmbed::new()
        .title(format!("{}'s Profile", subject.tag()))
        .description(
            "Police records and vehicles information can be accessed using the buttons below.",
        )
        .colour(SUMMARY_COLOUR)
        .thumbnail(subject.face());

    let buttons = CreateActionRow::Buttons(vec![
        button(ProfileButton::Vehicles(subject_id)),
        button(ProfileButton::PoliceRecords(subject_id)),
    ]);

    command
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new()
                    .embed(embed)
                    .components(vec![buttons]),
            ),
        )
        .await
        .context("Failed to send the profile summary")?;

    let reply = command
        .get_response(&ctx.http)
        .await
        .context("Failed to fetch the profile summary message")?;

    let mut clicks = reply
        .await_component_interaction(&ctx.shard)
        .timeout(COLLECT_WINDOW)
        .filter(move |click| {
            ProfileButton::parse(&click.data.custom_id)
                .is_some_and(|button| button.user_id() == subject_id)
        })
        .stream();

    let mut collected = 0usize;
    while let Some(click) = clicks.next().await {
        collected += 1;
        debug!(
            "Profile button '{}' clicked by {}",
            click.data.custom_id,
            click.user.tag()
        );

        if let Err(e) = answer_click(ctx, store, subject, &snapshot, &click).await {
            error!("Profile button handler failed: {e:#}");
            report_click_failure(ctx, &click).await;
        }
    }

    debug!(
        "Profile window for {} closed with {} click(s)",
        subject.tag(),
        collected
    );

    if collected == 0
        && let Err(e) = command
            .edit_response(
                &ctx.http,
                EditInteractionResponse::new()
                    .content(EXPIRY_NOTICE)
                    .components(Vec::new()),
            )
            .await
    {
        warn!("Failed to clear the expired profile summary: {}", e);
    }

    Ok(())
}

/// The subject is the `user` option when given, otherwise the invoker.
fn resolve_subject(command: &CommandInteraction) -> &User {
    for option in command.data.options() {
        if option.name == "user"
            && let ResolvedValue::User(user, _) = option.value
        {
            return user;
        }
    }
    &command.user
}

fn button(kind: ProfileButton) -> CreateButton {
    CreateButton::new(kind.custom_id())
        .label(kind.label())
        .style(ButtonStyle::Primary)
}

/// Answers one qualifying button click with its ephemeral detail view.
async fn answer_click(
    ctx: &Context,
    store: &RecordStore,
    subject: &User,
    snapshot: &ProfileSnapshot,
    click: &ComponentInteraction,
) -> Result<()> {
    let Some(kind) = ProfileButton::parse(&click.data.custom_id) else {
        // The collector filter only lets profile buttons through.
        return Ok(());
    };

    let embed = match kind {
        ProfileButton::Vehicles(_) => CreateEmbed::new()
            .title(format!("{}'s Registered Vehicles", subject.tag()))
            .description(format_vehicles(&snapshot.vehicles))
            .colour(VEHICLES_COLOUR),
        ProfileButton::PoliceRecords(_) => {
            let tickets = store
                .tickets(subject.id.get())
                .context("Failed to load ticket records")?;

            CreateEmbed::new()
                .title(format!("{}'s Police Records and Tickets", subject.tag()))
                .field("Arrests", format_arrests(&snapshot.police_records), false)
                .field("Tickets", format_tickets(&tickets), false)
                .field("License Status", &snapshot.license_status, false)
                .colour(POLICE_COLOUR)
        }
    };

    click
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new()
                    .embed(embed)
                    .ephemeral(true),
            ),
        )
        .await
        .context("Failed to send the detail reply")?;

    Ok(())
}

/// Error boundary per click: report privately, keep the window collecting.
async fn report_click_failure(ctx: &Context, click: &ComponentInteraction) {
    let reply = CreateInteractionResponseMessage::new()
        .content(CLICK_FAILURE)
        .ephemeral(true);

    if let Err(e) = click
        .create_response(&ctx.http, CreateInteractionResponse::Message(reply))
        .await
    {
        warn!("Failed to report a button failure: {}", e);
    }
}

/// Lists vehicles 1-indexed in file order.
fn format_vehicles(vehicles: &[VehicleRecord]) -> String {
    if vehicles.is_empty() {
        return NO_VEHICLES.to_owned();
    }

    vehicles
        .iter()
        .enumerate()
        .map(|(index, v)| {
            format!(
                "**{}.** Year: {}, Make: {}, Model: {}, Color: {}, Number Plate: {}",
                index + 1,
                v.year,
                v.make,
                v.model,
                v.color,
                v.number_plate
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Lists arrests 1-indexed in file order, one block per record.
fn format_arrests(records: &[PoliceRecord]) -> String {
    if records.is_empty() {
        return NO_ARRESTS.to_owned();
    }

    records
        .iter()
        .enumerate()
        .map(|(index, r)| {
            format!(
                "**{}.** Reason: {}\nOffenses: {}\nPrice: {}\nExecuted By: {}\nDate: {}",
                index + 1,
                r.reason,
                r.offenses,
                r.price,
                r.executed_by,
                r.date
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Lists tickets 1-indexed in file order, one block per record.
fn format_tickets(tickets: &[TicketRecord]) -> String {
    if tickets.is_empty() {
        return NO_TICKETS.to_owned();
    }

    tickets
        .iter()
        .enumerate()
        .map(|(index, t)| {
            format!(
                "**{}.** Offense: {}\nPrice: {}\nCount: {}\nDate: {}",
                index + 1,
                t.offense,
                t.price,
                t.count,
                t.date
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Current license status text, taken from the last entry by array position.
fn license_status(licenses: &[LicenseEntry]) -> String {
    LicenseEntry::most_recent(licenses).map_or_else(
        || NO_LICENSE.to_owned(),
        |entry| format!("**Status:** {}\n**Date:** {}", entry.status, entry.date),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Timestamp;

    fn vehicle(year: u16, make: &str, model: &str, color: &str, plate: &str) -> VehicleRecord {
        VehicleRecord {
            year,
            make: make.to_owned(),
            model: model.to_owned(),
            color: color.to_owned(),
            number_plate: plate.to_owned(),
        }
    }

    fn license(status: &str, date: Timestamp) -> LicenseEntry {
        LicenseEntry {
            status: status.to_owned(),
            date,
        }
    }

    #[test]
    fn test_format_vehicles_empty() {
        assert_eq!(format_vehicles(&[]), "No vehicles registered.");
    }

    #[test]
    fn test_format_vehicles_is_one_indexed_in_file_order() {
        let vehicles = vec![
            vehicle(2019, "Bravado", "Buffalo", "Black", "SA-1234"),
            vehicle(1998, "Declasse", "Tulip", "Green", "SA-5678"),
        ];

        assert_eq!(
            format_vehicles(&vehicles),
            "**1.** Year: 2019, Make: Bravado, Model: Buffalo, Color: Black, Number Plate: SA-1234\n\
             **2.** Year: 1998, Make: Declasse, Model: Tulip, Color: Green, Number Plate: SA-5678"
        );
    }

    #[test]
    fn test_format_arrests_empty() {
        assert_eq!(format_arrests(&[]), "No arrests found.");
    }

    #[test]
    fn test_format_arrests_blocks() {
        let records = vec![
            PoliceRecord {
                reason: "Speeding".to_owned(),
                offenses: "Reckless driving".to_owned(),
                price: 1500,
                executed_by: "Officer Doe".to_owned(),
                date: Timestamp::Millis(0),
            },
            PoliceRecord {
                reason: "Evasion".to_owned(),
                offenses: "Fleeing a pursuit".to_owned(),
                price: 3000,
                executed_by: "Officer Roe".to_owned(),
                date: Timestamp::Millis(0),
            },
        ];

        assert_eq!(
            format_arrests(&records),
            "**1.** Reason: Speeding\nOffenses: Reckless driving\nPrice: 1500\n\
             Executed By: Officer Doe\nDate: 1970-01-01 00:00:00 UTC\n\n\
             **2.** Reason: Evasion\nOffenses: Fleeing a pursuit\nPrice: 3000\n\
             Executed By: Officer Roe\nDate: 1970-01-01 00:00:00 UTC"
        );
    }

    #[test]
    fn test_format_tickets_empty() {
        assert_eq!(format_tickets(&[]), "No tickets found.");
    }

    #[test]
    fn test_format_tickets_blocks() {
        let tickets = vec![TicketRecord {
            offense: "Illegal parking".to_owned(),
            price: 80,
            count: 3,
            date: Timestamp::Millis(0),
        }];

        assert_eq!(
            format_tickets(&tickets),
            "**1.** Offense: Illegal parking\nPrice: 80\nCount: 3\nDate: 1970-01-01 00:00:00 UTC"
        );
    }

    #[test]
    fn test_license_status_empty() {
        assert_eq!(license_status(&[]), "No license records found.");
    }

    #[test]
    fn test_license_status_single_entry() {
        let licenses = vec![license("valid", Timestamp::Millis(0))];
        assert_eq!(
            license_status(&licenses),
            "**Status:** valid\n**Date:** 1970-01-01 00:00:00 UTC"
        );
    }

    #[test]
    fn test_license_status_uses_last_entry_only() {
        let licenses = vec![
            license("valid", Timestamp::Millis(500)),
            license("suspended", Timestamp::Millis(400)),
            license("revoked", Timestamp::Text("unknown date".to_owned())),
        ];
        assert_eq!(
            license_status(&licenses),
            "**Status:** revoked\n**Date:** unknown date"
        );
    }
}
