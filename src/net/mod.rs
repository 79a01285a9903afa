//! Line-based text protocol between a game and a remote seat.
//!
//! The game side turns each [`Player`] call into a [`Message`] line; the
//! remote side parses it and hands it to its local player with
//! [`dispatch`], sending back the reply line for the two decisions. Sockets
//! and line framing are left to the caller.

pub mod command;
pub mod message;
pub mod serializer;

pub use command::JassCommand;
pub use message::{decode_card_reply, decode_trump_reply, encode_card_reply, encode_trump_reply, Message};

use log::trace;

use crate::core::Result;
use crate::players::Player;

/// Deliver `message` to `player`.
///
/// Returns the reply line for [`JassCommand::Chtr`] and
/// [`JassCommand::Card`], `None` for notifications.
pub fn dispatch(player: &mut dyn Player, message: Message) -> Result<Option<String>> {
    trace!("dispatching {}", message.command());
    let reply = match message {
        Message::ChooseTrump { hand, can_pass } => Some(encode_trump_reply(player.choose_trump(hand, can_pass)?)),
        Message::CardToPlay { state, hand } => Some(encode_card_reply(player.card_to_play(&state, hand)?)),
        Message::Players { own_id, names } => {
            player.set_players(own_id, &names);
            None
        }
        Message::Trump(trump) => {
            player.set_trump(trump);
            None
        }
        Message::Hand(hand) => {
            player.update_hand(hand);
            None
        }
        Message::Trick(trick) => {
            player.update_trick(trick);
            None
        }
        Message::Score(score) => {
            player.update_score(score);
            None
        }
        Message::Winner(team) => {
            player.set_winning_team(team);
            None
        }
    };
    Ok(reply)
}
