mod cli;
mod handlers;

use anyhow::Result;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const PKG_NAME: &str = "npori";
    pub const BIN_NAME: &str = "npori";
}

fn main() -> Result<()> {
    let app = cli::create_npori_cli();
    let matches = app.get_matches();

    handlers::run_convert(&matches)
}
