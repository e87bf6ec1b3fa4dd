use steam_idle_trader::config::{parse, setup_env, Invocation, TradeArgs};
use steam_idle_trader::exit_code::{exit, TradeExit};
use steam_idle_trader::trade::BatchResolution;
use steam_idle_trader::{MobileAPI, SteamClient, TradeOfferAPI, TradeSender, WebSession};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    setup_env();

    let args = match parse::<TradeArgs, _>(std::env::args_os()) {
        Invocation::Run(args) => args,
        Invocation::Empty => exit(TradeExit::InsufficientArguments),
        Invocation::Info(error) | Invocation::Insufficient(error) => {
            let _ = error.print();
            exit(TradeExit::InsufficientArguments)
        },
        Invocation::Invalid(error) => {
            let _ = error.print();
            exit(TradeExit::Failure)
        },
    };
    let web = match WebSession::from_env() {
        Ok(web) => web,
        Err(error) => {
            log::error!("Error reading session cookies: {error}");
            exit(TradeExit::Failure)
        },
    };
    // the sender only reacts to request failures
    let (client, _events) = SteamClient::new(Some(web));
    let sender = TradeSender::new(
        client,
        TradeOfferAPI::new(),
        MobileAPI::new(),
        args.trade_config(),
    );

    match sender.run(&args.credentials()).await {
        Ok(outcome) => {
            for batch in &outcome.batches {
                match batch.resolution {
                    BatchResolution::Skipped => log::info!("[{}] Skipped", batch.kind),
                    BatchResolution::Sent(tradeofferid) => log::info!("[{}] Sent {tradeofferid}", batch.kind),
                    BatchResolution::Confirmed(tradeofferid) => log::info!("[{}] Confirmed {tradeofferid}", batch.kind),
                }
            }

            exit(TradeExit::from(&outcome))
        },
        Err(error) => {
            log::error!("{error}");
            exit(TradeExit::from(&error))
        },
    }
}
