mod command;
mod input;
mod logger;
mod tui;
mod util;
mod view;

fn main() -> anyhow::Result<()> {
    command::run()
}
