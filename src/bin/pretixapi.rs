//! pretix API CLI binary.
//!
//! A command-line interface for interacting with the pretix API.

use clap::Parser;
use pretixapi::cli::{Cli, Command, Entity};
use pretixapi::output::{EntityRow, PrettyPrint, Summarize};
use pretixapi::{
    CheckInList, EntityCollection, Event, Exporter, Get, Item, List, ListOptions, Order, OrderKey,
    Organizer, Position, PretixClient, PretixError, Question, Quota, Settings, SubEvent, ToPlain,
    Webhook,
};
use std::process::ExitCode;
use tabled::Table;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(tracing::Level::DEBUG)
            .init();
    }

    let mut client = match PretixClient::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: Set PRETIX_API_TOKEN and PRETIX_ORGANIZER environment variables");
            return ExitCode::FAILURE;
        }
    };
    if let Some(organizer) = &cli.organizer {
        client.set_organizer(organizer.clone());
    }

    match run(&client, cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Display settings shared by every command.
struct Output {
    json: bool,
    locale: Option<String>,
}

async fn run(client: &PretixClient, cli: Cli) -> pretixapi::Result<()> {
    let output = Output {
        json: cli.json,
        locale: cli.locale,
    };

    match cli.command {
        Command::Get { entity, id, event } => {
            handle_get(client, entity, &id, event.as_deref(), &output).await
        }
        Command::List { entity, event, all } => {
            handle_list(client, entity, event.as_deref(), all, &output).await
        }
    }
}

fn require_event(entity: Entity, event: Option<&str>) -> pretixapi::Result<String> {
    event.map(str::to_string).ok_or_else(|| {
        PretixError::InvalidArgument(format!("--event required for {entity:?}"))
    })
}

async fn handle_get(
    client: &PretixClient,
    entity: Entity,
    id: &str,
    event: Option<&str>,
    output: &Output,
) -> pretixapi::Result<()> {
    match entity {
        Entity::Organizer => {
            let organizer = Organizer::fetch(client, id.to_string()).await?;
            output_single(&organizer, output)
        }
        Entity::Event => {
            let event = Event::fetch(client, id.to_string()).await?;
            output_single(&event, output)
        }
        Entity::Order => {
            let key = OrderKey {
                organizer: client.organizer().to_string(),
                event: require_event(entity, event)?,
                code: id.to_string(),
            };
            let mut order = Order::fetch(client, key.clone()).await?;
            order.set_event(key.event);
            output_single(&order, output)
        }
        Entity::Webhook => {
            let id: i64 = id.parse().map_err(|_| {
                PretixError::InvalidArgument(format!("integer expected, got '{id}'"))
            })?;
            let webhook = Webhook::fetch(client, id).await?;
            output_single(&webhook, output)
        }
        Entity::Settings => {
            // The id is the event slug.
            let settings = Settings::fetch(client, id.to_string()).await?;
            output_single(&settings, output)
        }
        other => {
            eprintln!("Error: {other:?} can only be listed");
            eprintln!("Hint: Use 'pretixapi list {other:?} --event <slug>'");
            Err(PretixError::InvalidArgument(format!(
                "get {other:?} not supported"
            )))
        }
    }
}

async fn handle_list(
    client: &PretixClient,
    entity: Entity,
    event: Option<&str>,
    all: bool,
    output: &Output,
) -> pretixapi::Result<()> {
    let options = ListOptions {
        fetch_all: all,
        ..Default::default()
    };
    let event = if entity.needs_event() {
        require_event(entity, event)?
    } else {
        String::new()
    };

    match entity {
        Entity::Organizer => output_list(&Organizer::list(client, (), &options).await?, output),
        Entity::Event => output_list(&Event::list(client, (), &options).await?, output),
        Entity::SubEvent => output_list(&SubEvent::list(client, event, &options).await?, output),
        Entity::Item => output_list(&Item::list(client, event, &options).await?, output),
        Entity::Quota => output_list(&Quota::list(client, event, &options).await?, output),
        Entity::Order => output_list(&Order::list(client, event, &options).await?, output),
        Entity::Position => output_list(&Position::list(client, event, &options).await?, output),
        Entity::Webhook => output_list(&Webhook::list(client, (), &options).await?, output),
        Entity::Question => {
            let scope = (client.organizer().to_string(), event);
            output_list(&Question::list(client, scope, &options).await?, output)
        }
        Entity::CheckInList => {
            output_list(&CheckInList::list(client, event, &options).await?, output)
        }
        Entity::Exporter => output_list(&Exporter::list(client, event, &options).await?, output),
        Entity::Settings => {
            eprintln!("Error: Settings can only be retrieved for one event");
            eprintln!("Hint: Use 'pretixapi get settings <event-slug>'");
            Err(PretixError::InvalidArgument(
                "list settings not supported".to_string(),
            ))
        }
    }
}

fn output_single<T: ToPlain + PrettyPrint>(item: &T, output: &Output) -> pretixapi::Result<()> {
    if output.json {
        println!("{}", serde_json::to_string_pretty(&item.to_plain())?);
    } else {
        println!("{}", item.pretty_print(output.locale.as_deref()));
    }
    Ok(())
}

fn output_list<T: ToPlain + Summarize>(
    items: &EntityCollection<T>,
    output: &Output,
) -> pretixapi::Result<()> {
    if output.json {
        println!("{}", serde_json::to_string_pretty(&items.to_plain())?);
    } else {
        let locale = output.locale.as_deref();
        let rows: Vec<EntityRow> = items.iter().map(|i| i.summarize(locale)).collect();
        println!("{}", Table::new(rows));
        println!("\n{} items", items.len());
    }
    Ok(())
}
