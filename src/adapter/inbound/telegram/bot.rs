//! Telegram update dispatcher.
//!
//! Text messages are parsed into commands; exchange buttons arrive as
//! callback queries and their outcome replaces the prompt message.

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use teloxide::prelude::*;
use teloxide::types::{BotCommand, InlineKeyboardButton, InlineKeyboardMarkup};
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use super::command::{bot_commands, parse_message, CommandParseError};
use crate::domain::ChatId as AlertChat;
use crate::port::{Choice, Command, CommandHandler, Reply};

const CHOICES_PER_ROW: usize = 2;
const SHUTDOWN_RETRY: Duration = Duration::from_millis(50);

/// Long-polls Telegram and forwards commands to a [`CommandHandler`].
pub struct TelegramBot {
    bot: Bot,
    handler: Arc<dyn CommandHandler>,
}

impl TelegramBot {
    #[must_use]
    pub fn new(bot: Bot, handler: Arc<dyn CommandHandler>) -> Self {
        Self { bot, handler }
    }

    /// Dispatch updates until the shutdown flag flips to `true`.
    pub async fn run(self, shutdown: watch::Receiver<bool>) {
        if let Err(e) = register_bot_commands(&self.bot).await {
            warn!(error = %e, "Failed to register bot commands with Telegram");
        }

        let schema = dptree::entry()
            .branch(Update::filter_message().endpoint(on_message))
            .branch(Update::filter_callback_query().endpoint(on_callback));

        let mut dispatcher = Dispatcher::builder(self.bot, schema)
            .dependencies(dptree::deps![self.handler])
            .default_handler(|_| async {
                debug!("Ignoring unsupported update");
            })
            .build();

        if *shutdown.borrow() {
            info!("Shutdown requested before the command listener started");
            return;
        }

        let token = dispatcher.shutdown_token();
        let token = &token;
        let stop = stop_on_signal(shutdown, move || token.shutdown());

        info!("Telegram command listener started");
        tokio::select! {
            () = dispatcher.dispatch() => {}
            () = stop => {}
        }
        info!("Telegram command listener stopped");
    }
}

/// Wait for the shutdown flag, then ask the dispatcher to stop.
///
/// The dispatcher refuses a stop request until it is running, so refusals
/// are retried. Resolves once the dispatcher has stopped.
async fn stop_on_signal<F, D, E>(mut shutdown: watch::Receiver<bool>, mut request_stop: F)
where
    F: FnMut() -> Result<D, E>,
    D: Future<Output = ()>,
    E: Display,
{
    while !*shutdown.borrow() {
        if shutdown.changed().await.is_err() {
            break;
        }
    }
    loop {
        match request_stop() {
            Ok(done) => {
                done.await;
                return;
            }
            Err(e) => {
                debug!(error = %e, "Dispatcher not running yet, retrying stop");
                tokio::time::sleep(SHUTDOWN_RETRY).await;
            }
        }
    }
}

async fn on_message(
    bot: Bot,
    msg: Message,
    handler: Arc<dyn CommandHandler>,
) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let chat = AlertChat::new(msg.chat.id.0);

    let reply = match parse_message(text) {
        Ok(command) => handler.handle(chat, command).await,
        Err(CommandParseError::UnknownCommand(name)) => {
            debug!(%chat, command = %name, "Ignoring unknown command");
            return Ok(());
        }
        Err(CommandParseError::Empty) => return Ok(()),
        Err(e) => Reply::error(e),
    };

    let mut request = bot.send_message(msg.chat.id, reply.text);
    if let Some(keyboard) = choice_keyboard(&reply.choices) {
        request = request.reply_markup(keyboard);
    }
    if let Err(e) = request.await {
        error!(%chat, error = %e, "Failed to send Telegram reply");
    }
    Ok(())
}

async fn on_callback(
    bot: Bot,
    query: CallbackQuery,
    handler: Arc<dyn CommandHandler>,
) -> ResponseResult<()> {
    if let Err(e) = bot.answer_callback_query(query.id.clone()).await {
        warn!(error = %e, "Failed to answer callback query");
    }

    let Some(message) = query.message.as_ref() else {
        return Ok(());
    };
    let Some(exchange) = query.data.as_deref().and_then(Choice::parse_exchange) else {
        debug!(data = ?query.data, "Ignoring unknown callback");
        return Ok(());
    };

    let tg_chat = message.chat().id;
    let chat = AlertChat::new(tg_chat.0);
    let reply = handler
        .handle(chat, Command::SelectExchange { exchange })
        .await;

    let mut request = bot.edit_message_text(tg_chat, message.id(), reply.text);
    if let Some(keyboard) = choice_keyboard(&reply.choices) {
        request = request.reply_markup(keyboard);
    }
    if let Err(e) = request.await {
        error!(%chat, error = %e, "Failed to edit exchange prompt");
    }
    Ok(())
}

/// Lay choices out as callback buttons, two per row.
fn choice_keyboard(choices: &[Choice]) -> Option<InlineKeyboardMarkup> {
    if choices.is_empty() {
        return None;
    }
    let rows: Vec<Vec<InlineKeyboardButton>> = choices
        .chunks(CHOICES_PER_ROW)
        .map(|row| {
            row.iter()
                .map(|c| InlineKeyboardButton::callback(c.label.clone(), c.data.clone()))
                .collect()
        })
        .collect();
    Some(InlineKeyboardMarkup::new(rows))
}

/// Register bot commands with Telegram for the "/" menu.
async fn register_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    let commands: Vec<BotCommand> = bot_commands()
        .into_iter()
        .map(|(cmd, desc)| BotCommand::new(cmd, desc))
        .collect();

    bot.set_my_commands(commands).await?;
    info!("Registered bot commands with Telegram");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Exchange;

    #[test]
    fn exchange_choices_fill_two_rows() {
        let choices: Vec<Choice> = Exchange::ALL.into_iter().map(Choice::exchange).collect();
        let keyboard = choice_keyboard(&choices).unwrap();
        assert_eq!(keyboard.inline_keyboard.len(), 2);
        assert_eq!(keyboard.inline_keyboard[0].len(), 2);
        assert_eq!(keyboard.inline_keyboard[1][1].text, "MEXC");
    }

    #[tokio::test]
    async fn stop_retries_until_dispatcher_accepts() {
        let (_tx, rx) = watch::channel(true);
        let mut attempts = 0;
        stop_on_signal(rx, || {
            attempts += 1;
            if attempts < 3 {
                Err("idle")
            } else {
                Ok(async {})
            }
        })
        .await;
        assert_eq!(attempts, 3);
    }

    #[tokio::test]
    async fn stop_waits_for_the_flag() {
        let (tx, rx) = watch::channel(false);
        let stop = tokio::spawn(stop_on_signal(rx, || Ok::<_, &str>(async {})));
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!stop.is_finished());
        tx.send(true).unwrap();
        stop.await.unwrap();
    }

    #[test]
    fn no_choices_no_keyboard() {
        assert!(choice_keyboard(&[]).is_none());
    }
}
