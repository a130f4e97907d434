use hooktrace::config::Config;
use hooktrace::error::AppError;
use hooktrace::services::{
    classify_event, group_events_by_payload_id, group_events_by_type, group_title,
    relevant_groups, sequence_diagram, sort_chronologically, StatusColor,
};
use hooktrace::source::{EventSource, RemoteEventSource};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize logging
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // Load configuration
    let config = Config::from_env().map_err(|e| {
        log::error!("Configuration error: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    let target = config.target.clone().ok_or_else(|| {
        log::error!("Set WEBHOOKS_REPO (owner/name) and WEBHOOKS_PR to pick a pull request");
        std::io::Error::new(std::io::ErrorKind::InvalidInput, "no repository selected")
    })?;

    let source = RemoteEventSource::new(&config.api);

    // PR header is cosmetic; the timeline still renders without it
    let title = match source.pull_requests(&target.owner, &target.repo).await {
        Ok(response) => response
            .pull_requests
            .into_iter()
            .find(|pr| pr.number == target.pull_request)
            .map(|pr| pr.title),
        Err(e) => {
            log::warn!("Could not fetch pull request info: {}", e);
            None
        }
    };

    let response = match source
        .events(&target.owner, &target.repo, target.pull_request)
        .await
    {
        Ok(response) => response,
        Err(e @ AppError::Authentication(_)) => {
            log::error!("{}. Re-enter the API key via WEBHOOKS_API_KEY.", e);
            return Err(std::io::Error::other(e.to_string()));
        }
        Err(e) => {
            log::error!("{}", e);
            return Err(std::io::Error::other(e.to_string()));
        }
    };

    let mut events = response.events;
    sort_chronologically(&mut events);

    match title {
        Some(title) => println!(
            "{}/{} #{} {}",
            target.owner, target.repo, target.pull_request, title
        ),
        None => println!("{}/{} #{}", target.owner, target.repo, target.pull_request),
    }

    if events.is_empty() {
        println!("No events found for this pull request");
        return Ok(());
    }

    let grouped = group_events_by_payload_id(&events);
    let relevant = relevant_groups(&grouped);
    if !relevant.is_empty() {
        println!();
        println!("Event Sequences ({} groups)", relevant.len());
        for (key, members) in relevant {
            println!("  {} [{}]", group_title(members), key);
            for event in members {
                let class = classify_event(event);
                println!(
                    "    [{}] {} ({})",
                    color_name(class.color),
                    class.label,
                    event.occurred_at
                );
            }
        }
    }

    println!();
    println!("Event Timeline ({} events)", events.len());
    for (event_type, members) in group_events_by_type(&events) {
        println!("  {} ({} events)", event_type, members.len());
        for event in &members {
            let class = classify_event(event);
            println!(
                "    [{}] {} ({})",
                color_name(class.color),
                class.label,
                event.occurred_at
            );
        }
    }

    println!();
    println!("Event Sequence (mermaid)");
    println!("{}", sequence_diagram(&events));

    Ok(())
}

fn color_name(color: StatusColor) -> &'static str {
    match color {
        StatusColor::Green => "green",
        StatusColor::Red => "red",
        StatusColor::Gray => "gray",
        StatusColor::Yellow => "yellow",
        StatusColor::Purple => "purple",
        StatusColor::Blue => "blue",
    }
}
