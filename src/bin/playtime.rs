use steam_idle_trader::config::{parse, setup_env, Invocation, PlaytimeArgs};
use steam_idle_trader::exit_code::{exit, PlaytimeExit};
use steam_idle_trader::{Playtime, SteamClient};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    setup_env();

    let args = match parse::<PlaytimeArgs, _>(std::env::args_os()) {
        Invocation::Run(args) => args,
        Invocation::Empty => exit(PlaytimeExit::NoArguments),
        Invocation::Info(error) => {
            let _ = error.print();
            exit(PlaytimeExit::NoArguments)
        },
        Invocation::Insufficient(error) | Invocation::Invalid(error) => {
            let _ = error.print();
            exit(PlaytimeExit::Error)
        },
    };
    let (client, events) = SteamClient::new(None);
    let playtime = Playtime::new(args.app_ids.0.clone(), args.minutes);
    let outcome = playtime.run(&client, &args.credentials(), events).await;

    log::info!("Finished with {outcome:?}");
    exit(PlaytimeExit::from(outcome))
}
