use anyhow::Result;
use quad::{
    app::App,
    chat::{Transcript, feed::Feed},
    cli::{self, CLAP_ARGS},
    config::OPTIONS,
    logging,
};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    if cli::handle_subcommands() {
        return Ok(());
    }

    if let Err(e) = logging::init() {
        eprintln!("{e:#}");
    }

    let app = if let Some(("demo", args)) = CLAP_ARGS.subcommand() {
        let count = args.get_one::<usize>("count").copied().unwrap_or_default();
        let interval = args.get_one::<u64>("interval").copied().unwrap_or(1500);
        let mut feed = Feed::new(args.get_one::<u64>("seed").copied().unwrap_or_default());

        let transcript = Transcript::in_memory(feed.history(count));
        App::new(transcript).with_feed(feed, Duration::from_millis(interval))
    } else {
        let transcript = match &OPTIONS.transcript_path {
            Some(path) => Transcript::load(path)?,
            None => anyhow::bail!(
                "No transcript given. Pass a path or set transcript_path in the config."
            ),
        };

        App::new(transcript)
    };

    let res = app.run().await;

    if let Err(e) = &res {
        tracing::error!("{e:#}");
    }

    res
}
