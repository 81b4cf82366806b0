use blockfall_engine::GameSession;

use crate::{
    command::{LogArg, SessionConfigArg},
    tui::Tui,
};

use self::app::PlayApp;

mod app;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    #[clap(flatten)]
    session: SessionConfigArg,
    #[clap(flatten)]
    log: LogArg,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg { session, log } = arg;

    log.init()?;
    let config = session.resolve()?;
    let session = GameSession::new(config)?;
    log::info!("play: seed={}", session.seed());

    let mut app = PlayApp::new(session);
    Tui::new().run(&mut app)?;

    let stats = app.session().stats();
    log::info!(
        "play finished: score={} level={} lines={}",
        stats.score(),
        stats.level(),
        stats.total_cleared_lines()
    );
    Ok(())
}
