use clap::Parser;

mod caption;
mod cli;
mod config;
mod dispatch;
mod errors;
mod form;
mod log;
mod prompt;
mod provider;
mod session;
mod ux;

use dispatch::Dispatcher;
use errors::CaptionError;
use form::CaptionForm;
use session::Session;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A Vite-style .env next to the binary keeps working.
    let _ = dotenvy::dotenv();

    let args = cli::Args::parse();
    if args.no_color {
        colored::control::set_override(false);
    }

    let cfg = match config::Config::load(&args) {
        Ok(c) => c,
        Err(e) => fail(&e, args.debug),
    };
    if args.debug {
        eprintln!("debug[main]: flag enabled");
        log::print_config_debug(&cfg);
    }

    let prov = match provider::make_provider(&cfg) {
        Ok(p) => p,
        Err(e) => fail(&e, args.debug),
    };
    let dispatcher = Dispatcher::new(prov, cfg.reveal_delay(), args.debug)
        .with_indicator(Box::new(ux::Spinner::new(args.progress)));

    let mut session = Session::new();
    if let Err(e) = prefill_form(&args, &mut session.form) {
        fail(&e, args.debug);
    }

    if args.is_one_shot() {
        run_once(&args, &dispatcher, &mut session).await
    } else {
        run_interactive(&args, &dispatcher, &mut session).await
    }
}

/// Copies whichever form flags were given into the form.
fn prefill_form(args: &cli::Args, form: &mut CaptionForm) -> Result<(), CaptionError> {
    if let Some(p) = &args.platform {
        form.set_platform_str(p)?;
    }
    if let Some(s) = &args.style {
        form.set_style_str(s)?;
    }
    if let Some(t) = &args.topic {
        form.set_topic(t.as_str());
    }
    Ok(())
}

/// Dispatches the pre-filled form `--count` times.
async fn run_once(args: &cli::Args, dispatcher: &Dispatcher, session: &mut Session) -> anyhow::Result<()> {
    for _ in 0..args.count.max(1) {
        let index = session.captions().len();
        match dispatcher.dispatch(session).await {
            Ok(rec) => println!("{}\n", ux::caption_card(index, rec)),
            Err(e) => fail(&e, args.debug),
        }
    }
    Ok(())
}

async fn run_interactive(args: &cli::Args, dispatcher: &Dispatcher, session: &mut Session) -> anyhow::Result<()> {
    ux::show_banner();

    loop {
        if !ux::edit_form(&mut session.form)? {
            break;
        }
        println!();
        ux::show_form(&session.form);

        let outcome = dispatcher.dispatch(session).await.map(|_| ());
        match outcome {
            Ok(()) => ux::print_captions(session.captions()),
            Err(e) => ux::notice(&e, args.debug),
        }

        if !ux::confirm("Generate another caption?") {
            break;
        }
    }

    println!("\n{} caption(s) generated this session.", session.captions().len());
    Ok(())
}

fn fail(err: &CaptionError, debug: bool) -> ! {
    ux::notice(err, debug);
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use caption::{Platform, Style};

    #[test]
    fn partial_flags_prefill_the_interactive_form() {
        let args = cli::Args::parse_from(["caption_gen", "--platform", "twitter"]);
        let mut form = CaptionForm::default();
        prefill_form(&args, &mut form).unwrap();

        assert!(!args.is_one_shot());
        assert_eq!(form.platform(), Some(Platform::Twitter));
        assert_eq!(form.style(), None);
        assert_eq!(form.topic(), "");
    }

    #[test]
    fn full_flags_fill_every_field() {
        let args = cli::Args::parse_from([
            "caption_gen", "--platform", "Twitter", "--style", "humorous", "--topic", "Course Completion",
        ]);
        let mut form = CaptionForm::default();
        prefill_form(&args, &mut form).unwrap();

        assert!(args.is_one_shot());
        let v = form.validate().unwrap();
        assert_eq!((v.platform, v.style, v.topic.as_str()), (Platform::Twitter, Style::Humorous, "Course Completion"));
    }

    #[test]
    fn unknown_flag_value_is_reported() {
        let args = cli::Args::parse_from(["caption_gen", "--style", "sarcastic"]);
        let err = prefill_form(&args, &mut CaptionForm::default()).unwrap_err();
        assert!(matches!(err, CaptionError::UnknownChoice { .. }));
    }
}
