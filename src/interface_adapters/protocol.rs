// Wire protocol DTOs and conversions for public museum server messages.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{Artwork, Guest, MusicSource};
use crate::domain::state::GuestView;
use crate::use_cases::audio::{AudioChannel, AudioCommand};
use crate::use_cases::{HallEvent, HallUpdate, MuseumEvent};

/// Messages the server sends to connected clients over the WebSocket.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum ServerMessage {
    // Snapshot of the hall for a given tick.
    HallUpdate(HallUpdateDto),
    // Discrete notifications: critiques, economy, auction, audio.
    Event(MuseumEventDto),
}

/// Messages the client sends to the server over the WebSocket.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ClientMessage {
    SetGuests { guests: Vec<Guest> },
    SetArtworks { artworks: Vec<Artwork> },
    OpenArtwork { art_id: String },
    CloseArtwork,
    CleanArtwork { art_id: String },
    SellArtwork { art_id: String },
    StartAuction { art_id: String },
    PlaceBid { amount: i64 },
    PassTurn,
    CancelAuction,
    SetVolume { volume: f32 },
    SetGlobalMusic { source: MusicSource },
}

impl From<ClientMessage> for HallEvent {
    fn from(msg: ClientMessage) -> Self {
        match msg {
            ClientMessage::SetGuests { guests } => HallEvent::RosterUpdated { guests },
            ClientMessage::SetArtworks { artworks } => HallEvent::CollectionUpdated { artworks },
            ClientMessage::OpenArtwork { art_id } => HallEvent::ArtworkOpened { art_id },
            ClientMessage::CloseArtwork => HallEvent::ArtworkClosed,
            ClientMessage::CleanArtwork { art_id } => HallEvent::ArtworkCleaned { art_id },
            ClientMessage::SellArtwork { art_id } => HallEvent::ArtworkSold { art_id },
            ClientMessage::StartAuction { art_id } => HallEvent::AuctionStarted { art_id },
            ClientMessage::PlaceBid { amount } => HallEvent::AuctionBid { amount },
            ClientMessage::PassTurn => HallEvent::AuctionPassed,
            ClientMessage::CancelAuction => HallEvent::AuctionCancelled,
            ClientMessage::SetVolume { volume } => HallEvent::VolumeChanged { volume },
            ClientMessage::SetGlobalMusic { source } => HallEvent::GlobalMusicChanged { source },
        }
    }
}

/// Snapshot of the hall sent to clients on each tick.
#[derive(Debug, Clone, Serialize)]
pub struct HallUpdateDto {
    pub tick: u64,
    pub guests: Vec<GuestView>,
}

impl From<HallUpdate> for HallUpdateDto {
    fn from(update: HallUpdate) -> Self {
        Self {
            tick: update.tick,
            guests: update.guests,
        }
    }
}

/// Audio channel names on the wire.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioChannelDto {
    Global,
    Art,
}

impl From<AudioChannel> for AudioChannelDto {
    fn from(channel: AudioChannel) -> Self {
        match channel {
            AudioChannel::Global => AudioChannelDto::Global,
            AudioChannel::Art => AudioChannelDto::Art,
        }
    }
}

/// Playback instructions the client applies to its audio players.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum AudioCommandDto {
    Load {
        channel: AudioChannelDto,
        source: MusicSource,
    },
    Play {
        channel: AudioChannelDto,
    },
    Pause {
        channel: AudioChannelDto,
    },
    SetVolume {
        channel: AudioChannelDto,
        volume: f32,
    },
}

impl From<AudioCommand> for AudioCommandDto {
    fn from(cmd: AudioCommand) -> Self {
        match cmd {
            AudioCommand::Load { channel, source } => AudioCommandDto::Load {
                channel: channel.into(),
                source,
            },
            AudioCommand::Play { channel } => AudioCommandDto::Play {
                channel: channel.into(),
            },
            AudioCommand::Pause { channel } => AudioCommandDto::Pause {
                channel: channel.into(),
            },
            AudioCommand::SetVolume { channel, volume } => AudioCommandDto::SetVolume {
                channel: channel.into(),
                volume,
            },
        }
    }
}

/// Discrete notifications for wire transmission.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MuseumEventDto {
    CritiqueSpoken {
        guest_id: String,
        guest_name: String,
        art_id: String,
        text: String,
        fresh: bool,
    },
    ArtworkUpdated {
        artwork: Artwork,
    },
    BalanceUpdated {
        balance: i64,
    },
    AuctionTurn {
        bidder_name: String,
        is_user_turn: bool,
    },
    AuctionBidPlaced {
        bidder_name: String,
        amount: i64,
    },
    AuctionPassed {
        bidder_name: String,
    },
    AuctionEnded {
        art_id: String,
        winner_name: String,
        final_price: i64,
    },
    BidRejected {
        reason: String,
    },
    Audio(AudioCommandDto),
}

impl From<MuseumEvent> for MuseumEventDto {
    fn from(event: MuseumEvent) -> Self {
        match event {
            MuseumEvent::CritiqueSpoken {
                guest_id,
                guest_name,
                art_id,
                text,
                fresh,
            } => MuseumEventDto::CritiqueSpoken {
                guest_id,
                guest_name,
                art_id,
                text,
                fresh,
            },
            MuseumEvent::ArtworkUpdated { artwork } => MuseumEventDto::ArtworkUpdated { artwork },
            MuseumEvent::BalanceUpdated { balance } => MuseumEventDto::BalanceUpdated { balance },
            MuseumEvent::AuctionTurn {
                bidder_name,
                is_user_turn,
            } => MuseumEventDto::AuctionTurn {
                bidder_name,
                is_user_turn,
            },
            MuseumEvent::AuctionBidPlaced {
                bidder_name,
                amount,
            } => MuseumEventDto::AuctionBidPlaced {
                bidder_name,
                amount,
            },
            MuseumEvent::AuctionPassed { bidder_name } => {
                MuseumEventDto::AuctionPassed { bidder_name }
            }
            MuseumEvent::AuctionEnded {
                art_id,
                winner_name,
                final_price,
            } => MuseumEventDto::AuctionEnded {
                art_id,
                winner_name,
                final_price,
            },
            MuseumEvent::BidRejected { reason } => MuseumEventDto::BidRejected { reason },
            MuseumEvent::Audio(cmd) => MuseumEventDto::Audio(cmd.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_messages_parse_from_tagged_json() {
        let msg: ClientMessage =
            serde_json::from_str(r#"{"type":"OpenArtwork","data":{"art_id":"a1"}}"#)
                .expect("valid message");
        assert!(matches!(msg, ClientMessage::OpenArtwork { art_id } if art_id == "a1"));

        let msg: ClientMessage = serde_json::from_str(r#"{"type":"CloseArtwork"}"#)
            .expect("unit variants need no data field");
        assert!(matches!(msg, ClientMessage::CloseArtwork));
    }

    #[test]
    fn music_sources_round_trip_on_the_wire() {
        let msg: ClientMessage = serde_json::from_str(
            r#"{"type":"SetGlobalMusic","data":{"source":{"kind":"you_tube","url":"abc123"}}}"#,
        )
        .expect("valid message");
        let ClientMessage::SetGlobalMusic { source } = msg else {
            panic!("wrong variant");
        };
        assert_eq!(source, MusicSource::YouTube("abc123".to_string()));
    }

    #[test]
    fn server_events_serialize_with_a_kind_tag() {
        let dto = MuseumEventDto::from(MuseumEvent::BalanceUpdated { balance: 42 });
        let json = serde_json::to_string(&ServerMessage::Event(dto)).expect("serializable");
        assert!(json.contains(r#""type":"Event""#));
        assert!(json.contains(r#""kind":"balance_updated""#));
        assert!(json.contains(r#""balance":42"#));
    }
}
