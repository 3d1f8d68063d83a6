// SPDX-License-Identifier: MPL-2.0
use shilpkar_gallery::app::{self, config, paths, Flags};
use shilpkar_gallery::i18n::fluent::I18n;
use std::path::PathBuf;

fn main() -> iced::Result {
    let mut args = pico_args::Arguments::from_env();

    let config_dir: Option<String> = args.opt_value_from_str("--config-dir").unwrap_or(None);
    paths::init_cli_overrides(config_dir);

    let lang: Option<String> = args.opt_value_from_str("--lang").unwrap_or(None);

    if args.contains(["-h", "--help"]) {
        let (config, _) = config::load();
        println!("{}", I18n::new(lang, &config).tr("cli-help"));
        return Ok(());
    }

    let flags = Flags {
        lang,
        database_url: args.opt_value_from_str("--database-url").unwrap_or(None),
        collection: args.opt_value_from_str("--collection").unwrap_or(None),
        snapshot: args
            .opt_value_from_str::<_, String>("--snapshot")
            .unwrap_or(None)
            .map(PathBuf::from),
        diagnostics_report: args
            .opt_value_from_str::<_, String>("--diagnostics-report")
            .unwrap_or(None)
            .map(PathBuf::from),
    };

    let remaining = args.finish();
    if !remaining.is_empty() {
        eprintln!("[WARN] Ignoring unknown arguments: {remaining:?}");
    }

    app::run(flags)
}
