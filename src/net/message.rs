//! Protocol lines and their typed form.

use super::command::JassCommand;
use super::serializer::{
    deserialize_bool, deserialize_string, deserialize_u32, deserialize_u64, join, serialize_bool, serialize_string,
    serialize_u32, serialize_u64, split, COMPONENT_SEPARATOR, FIELD_SEPARATOR,
};
use crate::cards::{Card, CardSet, Color};
use crate::core::{JassError, PlayerId, PlayerMap, Result, TeamId};
use crate::rules::{Score, Trick, TurnState};

/// Reply index meaning "pass" in answer to [`JassCommand::Chtr`].
const PASS_INDEX: u32 = Color::COUNT as u32;

/// One line of the protocol, sent by the game to a remote seat.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Message {
    /// `CHTR <hand> <canPass>`
    ChooseTrump { hand: CardSet, can_pass: bool },
    /// `PLRS <ownIndex> <name1>,<name2>,<name3>,<name4>`
    Players { own_id: PlayerId, names: PlayerMap<String> },
    /// `TRMP <colorIndex>`
    Trump(Color),
    /// `HAND <hand>`
    Hand(CardSet),
    /// `TRCK <trick>`
    Trick(Trick),
    /// `CARD <score>,<unplayed>,<trick> <hand>`
    CardToPlay { state: TurnState, hand: CardSet },
    /// `SCOR <score>`
    Score(Score),
    /// `WINR <teamIndex>`
    Winner(TeamId),
}

impl Message {
    #[must_use]
    pub fn command(&self) -> JassCommand {
        match self {
            Message::ChooseTrump { .. } => JassCommand::Chtr,
            Message::Players { .. } => JassCommand::Plrs,
            Message::Trump(_) => JassCommand::Trmp,
            Message::Hand(_) => JassCommand::Hand,
            Message::Trick(_) => JassCommand::Trck,
            Message::CardToPlay { .. } => JassCommand::Card,
            Message::Score(_) => JassCommand::Scor,
            Message::Winner(_) => JassCommand::Winr,
        }
    }

    /// The line for this message, without a trailing newline.
    #[must_use]
    pub fn to_line(&self) -> String {
        let mut fields = vec![self.command().to_string()];
        match self {
            Message::ChooseTrump { hand, can_pass } => {
                fields.push(serialize_u64(hand.packed()));
                fields.push(serialize_bool(*can_pass));
            }
            Message::Players { own_id, names } => {
                fields.push(serialize_u32(own_id.index() as u32));
                let names: Vec<String> = names.iter().map(|(_, name)| serialize_string(name)).collect();
                fields.push(join(COMPONENT_SEPARATOR, &names));
            }
            Message::Trump(color) => fields.push(serialize_u32(color.index() as u32)),
            Message::Hand(hand) => fields.push(serialize_u64(hand.packed())),
            Message::Trick(trick) => fields.push(serialize_u32(trick.packed())),
            Message::CardToPlay { state, hand } => {
                fields.push(join(
                    COMPONENT_SEPARATOR,
                    &[
                        serialize_u64(state.packed_score()),
                        serialize_u64(state.packed_unplayed_cards()),
                        serialize_u32(state.packed_trick()),
                    ],
                ));
                fields.push(serialize_u64(hand.packed()));
            }
            Message::Score(score) => fields.push(serialize_u64(score.packed())),
            Message::Winner(team) => fields.push(serialize_u32(team.index() as u32)),
        }
        join(FIELD_SEPARATOR, &fields)
    }

    /// Decode one line, with or without its trailing newline.
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        let (command, args) = line.split_once(FIELD_SEPARATOR).unwrap_or((line, ""));
        let command: JassCommand = command.parse()?;
        match command {
            JassCommand::Chtr => {
                let [hand, can_pass] = split(FIELD_SEPARATOR, args)?;
                Ok(Message::ChooseTrump {
                    hand: CardSet::of_packed(deserialize_u64(hand)?)?,
                    can_pass: deserialize_bool(can_pass)?,
                })
            }
            JassCommand::Plrs => {
                let [own, names] = split(FIELD_SEPARATOR, args)?;
                let encoded: [&str; PlayerId::COUNT] = split(COMPONENT_SEPARATOR, names)?;
                let mut decoded = PlayerMap::<String>::default();
                for (player, name) in PlayerId::ALL.into_iter().zip(encoded) {
                    decoded[player] = deserialize_string(name)?;
                }
                Ok(Message::Players {
                    own_id: player_id(deserialize_u32(own)?)?,
                    names: decoded,
                })
            }
            JassCommand::Trmp => {
                let [color] = split(FIELD_SEPARATOR, args)?;
                Ok(Message::Trump(color_of(deserialize_u32(color)?)?))
            }
            JassCommand::Hand => {
                let [hand] = split(FIELD_SEPARATOR, args)?;
                Ok(Message::Hand(CardSet::of_packed(deserialize_u64(hand)?)?))
            }
            JassCommand::Trck => {
                let [trick] = split(FIELD_SEPARATOR, args)?;
                Ok(Message::Trick(Trick::of_packed(deserialize_u32(trick)?)?))
            }
            JassCommand::Card => {
                let [state, hand] = split(FIELD_SEPARATOR, args)?;
                let [score, unplayed, trick] = split(COMPONENT_SEPARATOR, state)?;
                Ok(Message::CardToPlay {
                    state: TurnState::of_packed_components(
                        deserialize_u64(score)?,
                        deserialize_u64(unplayed)?,
                        deserialize_u32(trick)?,
                    )?,
                    hand: CardSet::of_packed(deserialize_u64(hand)?)?,
                })
            }
            JassCommand::Scor => {
                let [score] = split(FIELD_SEPARATOR, args)?;
                Ok(Message::Score(Score::of_packed(deserialize_u64(score)?)?))
            }
            JassCommand::Winr => {
                let [team] = split(FIELD_SEPARATOR, args)?;
                let index = deserialize_u32(team)?;
                let team = TeamId::from_index(index as usize)
                    .ok_or_else(|| JassError::Protocol(format!("no team {index}")))?;
                Ok(Message::Winner(team))
            }
        }
    }
}

fn player_id(index: u32) -> Result<PlayerId> {
    PlayerId::from_index(index as usize).ok_or_else(|| JassError::Protocol(format!("no player {index}")))
}

fn color_of(index: u32) -> Result<Color> {
    Color::from_index(index as usize).ok_or_else(|| JassError::Protocol(format!("no color {index}")))
}

/// Reply line to [`Message::ChooseTrump`]: the color index, or 4 to pass.
#[must_use]
pub fn encode_trump_reply(trump: Option<Color>) -> String {
    serialize_u32(trump.map_or(PASS_INDEX, |c| c.index() as u32))
}

pub fn decode_trump_reply(line: &str) -> Result<Option<Color>> {
    match deserialize_u32(line.trim_end_matches(['\r', '\n']))? {
        PASS_INDEX => Ok(None),
        index => color_of(index).map(Some),
    }
}

/// Reply line to [`Message::CardToPlay`]: the packed card.
#[must_use]
pub fn encode_card_reply(card: Card) -> String {
    serialize_u32(card.packed())
}

pub fn decode_card_reply(line: &str) -> Result<Card> {
    Card::of_packed(deserialize_u32(line.trim_end_matches(['\r', '\n']))?)
}
