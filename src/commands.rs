// src/commands.rs
//! Runs a parsed command against the API and prints the result.

use crate::api::{parser, TweetDraft, XHttpClient};
use crate::config::{Command, MeCommand, TweetCommand, UserCommand, WatchArgs};
use crate::error::AppError;
use crate::output::{DesktopNotifier, Renderer, TerminalRenderer};
use crate::types::{Credentials, OutputMode, TweetId, Username};
use crate::watch::{run_watch, InterruptSignal, SystemClock, WatchOptions};
use serde_json::Value;
use std::time::Duration;

/// Output preferences shared by every command.
#[derive(Debug, Clone, Copy)]
pub struct OutputSettings {
    pub mode: OutputMode,
    pub verbose: bool,
}

/// Executes `command` with `credentials`.
pub async fn execute(
    command: Command,
    credentials: Credentials,
    output: OutputSettings,
) -> Result<(), AppError> {
    let mut client = XHttpClient::new(credentials)?;
    if command.needs_identity() {
        client = client.resolve_identity().await?;
    }

    let (payload, title) = match command {
        Command::Watch(args) => return watch(&client, args, output).await,
        Command::Tweet(cmd) => run_tweet(&client, cmd).await?,
        Command::User(cmd) => run_user(&client, cmd).await?,
        Command::Me(cmd) => run_me(&client, cmd).await?,
        Command::Like { id_or_url } => {
            let id = TweetId::parse(&id_or_url)?;
            (client.like_tweet(&id).await?, "Liked".to_string())
        }
        Command::Unlike { id_or_url } => {
            let id = TweetId::parse(&id_or_url)?;
            (client.unlike_tweet(&id).await?, "Unliked".to_string())
        }
        Command::Retweet { id_or_url } => {
            let id = TweetId::parse(&id_or_url)?;
            (client.retweet(&id).await?, "Retweeted".to_string())
        }
        Command::Unretweet { id_or_url } => {
            let id = TweetId::parse(&id_or_url)?;
            (client.unretweet(&id).await?, "Unretweeted".to_string())
        }
    };

    log::debug!("Rendering '{}' as {}", title, output.mode);
    TerminalRenderer.render(&payload, output.mode, &title, output.verbose)
}

async fn run_tweet(client: &XHttpClient, cmd: TweetCommand) -> Result<(Value, String), AppError> {
    match cmd {
        TweetCommand::Post {
            text,
            poll,
            poll_duration,
        } => {
            let mut draft = TweetDraft::new(text);
            if let Some(poll) = poll {
                draft = draft.with_poll(poll_options(&poll), poll_duration);
            }
            Ok((client.post_tweet(&draft).await?, "Posted".to_string()))
        }
        TweetCommand::Get { id_or_url } => {
            let id = TweetId::parse(&id_or_url)?;
            Ok((client.get_tweet(&id).await?, format!("Tweet {}", id)))
        }
        TweetCommand::Delete { id_or_url } => {
            let id = TweetId::parse(&id_or_url)?;
            Ok((client.delete_tweet(&id).await?, "Deleted".to_string()))
        }
        TweetCommand::Reply { id_or_url, text } => {
            let id = TweetId::parse(&id_or_url)?;
            let draft = TweetDraft::new(text).replying_to(id);
            Ok((client.post_tweet(&draft).await?, "Reply".to_string()))
        }
        TweetCommand::Quote { id_or_url, text } => {
            let id = TweetId::parse(&id_or_url)?;
            let draft = TweetDraft::new(text).quoting(id);
            Ok((client.post_tweet(&draft).await?, "Quote".to_string()))
        }
        TweetCommand::Search { query, max_results } => {
            let response = client.search_tweets(&query, max_results).await?;
            Ok((response, format!("Search: {}", query)))
        }
        TweetCommand::Metrics { id_or_url } => {
            let id = TweetId::parse(&id_or_url)?;
            Ok((client.get_tweet_metrics(&id).await?, format!("Metrics {}", id)))
        }
    }
}

async fn run_user(client: &XHttpClient, cmd: UserCommand) -> Result<(Value, String), AppError> {
    match cmd {
        UserCommand::Get { username } => {
            let username = Username::new(&username)?;
            Ok((client.get_user(&username).await?, username.handle()))
        }
        UserCommand::Timeline {
            username,
            max_results,
        } => {
            let username = Username::new(&username)?;
            let user_id = parser::data_id(&client.get_user(&username).await?)?;
            let response = client.get_timeline(&user_id, max_results, None).await?;
            Ok((response, format!("{} timeline", username.handle())))
        }
        UserCommand::Followers {
            username,
            max_results,
        } => {
            let username = Username::new(&username)?;
            let user_id = parser::data_id(&client.get_user(&username).await?)?;
            let response = client.get_followers(&user_id, max_results).await?;
            Ok((response, format!("{} followers", username.handle())))
        }
        UserCommand::Following {
            username,
            max_results,
        } => {
            let username = Username::new(&username)?;
            let user_id = parser::data_id(&client.get_user(&username).await?)?;
            let response = client.get_following(&user_id, max_results).await?;
            Ok((response, format!("{} following", username.handle())))
        }
    }
}

async fn run_me(client: &XHttpClient, cmd: MeCommand) -> Result<(Value, String), AppError> {
    match cmd {
        MeCommand::Mentions { max_results } => {
            Ok((client.get_mentions(max_results).await?, "Mentions".to_string()))
        }
        MeCommand::Bookmarks { max_results } => {
            Ok((client.get_bookmarks(max_results).await?, "Bookmarks".to_string()))
        }
        MeCommand::Bookmark { id_or_url } => {
            let id = TweetId::parse(&id_or_url)?;
            Ok((client.bookmark_tweet(&id).await?, "Bookmarked".to_string()))
        }
        MeCommand::Unbookmark { id_or_url } => {
            let id = TweetId::parse(&id_or_url)?;
            Ok((client.unbookmark_tweet(&id).await?, "Unbookmarked".to_string()))
        }
    }
}

async fn watch(client: &XHttpClient, args: WatchArgs, output: OutputSettings) -> Result<(), AppError> {
    let usernames = args
        .usernames
        .iter()
        .map(Username::new)
        .collect::<Result<Vec<_>, _>>()?;

    let options = WatchOptions {
        interval: Duration::from_secs(args.interval),
        max_items: args.max_items(),
        filters: args.filters,
        notify: args.notify,
        mode: output.mode,
        verbose: output.verbose,
    };

    let interrupt = InterruptSignal::new();
    let listener = interrupt.install_ctrl_c();

    let outcome = run_watch(
        client,
        &TerminalRenderer,
        &DesktopNotifier,
        &SystemClock,
        interrupt,
        &usernames,
        options,
    )
    .await;

    listener.abort();
    outcome.map(|outcome| {
        log::debug!("Watch stopped: {:?}", outcome.reason);
    })
}

/// `"a, b,c"` → `["a", "b", "c"]`
fn poll_options(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|o| o.trim().to_string())
        .filter(|o| !o.is_empty())
        .collect()
}
