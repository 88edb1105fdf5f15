// The authoritative museum hall loop. Single writer for all simulation and
// economy state; inputs arrive over a channel, snapshots and notifications
// leave over broadcasts.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::{broadcast, mpsc};
use tracing::{info, warn};

use crate::domain::entities::{
    Artwork, ArtworkSummary, Critique, CritiqueMemory, Facing, Guest, GuestPersona, MusicSource,
    UserAccount,
};
use crate::domain::ports::{Clock, CritiqueProvider, QuotaStore};
use crate::domain::state::{Activity, GuestSim, GuestView};
use crate::domain::tuning::{AuctionTuning, AudioTuning, EconomyTuning, GuestTuning};
use crate::systems::{economy, wandering};
use crate::use_cases::audio::{AudioCommand, AudioDirector};
use crate::use_cases::auction::{AuctionSession, TurnAction};
use crate::use_cases::quota::DailyQuota;
use crate::use_cases::types::{CritiqueOutcome, HallEvent, HallUpdate, MuseumEvent};

/// Everything the hall simulates, seeded once at startup and then owned
/// exclusively by the loop.
#[derive(Debug, Clone)]
pub struct MuseumWorld {
    pub artworks: Vec<Artwork>,
    pub guests: Vec<Guest>,
    pub user: UserAccount,
    pub global_music: MusicSource,
    pub volume: f32,
}

#[derive(Debug, Clone)]
pub struct HallSettings {
    pub tick_interval: Duration,
    pub rng_seed: u64,
    pub guest: GuestTuning,
    pub auction: AuctionTuning,
    pub economy: EconomyTuning,
    pub audio: AudioTuning,
}

/// The user's open detail view, priced when it closes.
struct ViewingSession {
    art_id: String,
    opened_at_ms: u64,
}

/// A live auction plus the loop-side deadlines that drive it.
struct RunningAuction {
    session: AuctionSession,
    /// When the next AI turn resolves; meaningless on the user's turn.
    next_action_at_ms: u64,
    /// Set once the gavel falls; settlement happens when it expires.
    settle_at_ms: Option<u64>,
}

pub async fn hall_task<C, S>(
    mut world: MuseumWorld,
    settings: HallSettings,
    mut quota: DailyQuota<C, S>,
    provider: Arc<dyn CritiqueProvider>,
    clock: Arc<dyn Clock>,
    mut input_rx: mpsc::Receiver<HallEvent>,
    hall_tx: broadcast::Sender<HallUpdate>,
    event_tx: broadcast::Sender<MuseumEvent>,
    shutdown: Arc<tokio::sync::Notify>,
) where
    C: Clock,
    S: QuotaStore,
{
    let tick_ms = settings.tick_interval.as_millis() as u64;
    let dt = settings.tick_interval.as_secs_f32();
    let mut rng = StdRng::seed_from_u64(settings.rng_seed);
    let mut tick: u64 = 0;
    // Simulation clock in ms; every deadline in the loop lives on it.
    let mut sim_ms: u64 = 0;

    let mut generation: u64 = 0;
    place_anchors(&mut world.artworks);
    let mut guest_pool: Vec<String> = world.guests.iter().map(|g| g.id.clone()).collect();
    let mut sims = spawn_sims(&world.guests, generation, world.artworks.len(), &settings, &mut rng);

    let mut viewing: Option<ViewingSession> = None;
    let mut auction: Option<RunningAuction> = None;
    let mut audio = AudioDirector::new(settings.audio, world.volume);
    let mut next_recall_at_ms = settings.guest.recall_interval_ms;

    // Off-loop critique generations come back through this channel tagged
    // with the roster generation they were started under.
    let (critique_tx, mut critique_rx) = mpsc::unbounded_channel::<CritiqueOutcome>();
    // Guests with a generation in flight; stops a revisit from asking twice
    // while the daily allotment is only spent on success.
    let mut pending_critiques: HashSet<String> = HashSet::new();

    quota.load().await;

    if world.global_music.is_configured() {
        let mut cmds = Vec::new();
        audio.set_global_source(world.global_music.clone(), sim_ms, &mut cmds);
        emit_audio(&event_tx, cmds);
    }

    let mut interval = tokio::time::interval(settings.tick_interval);

    loop {
        tokio::select! {
            _ = shutdown.notified() => {
                break;
            }
            _ = interval.tick() => {}
        }
        sim_ms += tick_ms;

        while let Ok(ev) = input_rx.try_recv() {
            match ev {
                HallEvent::RosterUpdated { guests } => {
                    info!(count = guests.len(), "guest roster updated");
                    world.guests = guests;
                    guest_pool = world.guests.iter().map(|g| g.id.clone()).collect();
                    generation += 1;
                    pending_critiques.clear();
                    sims = spawn_sims(
                        &world.guests,
                        generation,
                        world.artworks.len(),
                        &settings,
                        &mut rng,
                    );
                }
                HallEvent::CollectionUpdated { artworks } => {
                    info!(count = artworks.len(), "artwork collection updated");
                    world.artworks = artworks;
                    place_anchors(&mut world.artworks);
                    // A viewing session for a removed artwork is dropped
                    // without a receipt.
                    if let Some(session) = &viewing {
                        if !world.artworks.iter().any(|a| a.id == session.art_id) {
                            viewing = None;
                            let mut cmds = Vec::new();
                            audio.on_artwork_changed(None, sim_ms, &mut cmds);
                            emit_audio(&event_tx, cmds);
                        }
                    }
                    for sim in &mut sims {
                        let stale = sim
                            .viewing_art_id
                            .as_ref()
                            .is_some_and(|id| !world.artworks.iter().any(|a| a.id == *id));
                        if stale {
                            sim.activity = Activity::Walking;
                            sim.viewing_art_id = None;
                        }
                    }
                }
                HallEvent::ArtworkOpened { art_id } => {
                    close_viewing_session(
                        &mut viewing,
                        &mut world,
                        sim_ms,
                        settings.economy,
                        &event_tx,
                    );
                    if let Some(art) = world.artworks.iter_mut().find(|a| a.id == art_id) {
                        economy::register_click(art, clock.today());
                        viewing = Some(ViewingSession {
                            art_id: art.id.clone(),
                            opened_at_ms: sim_ms,
                        });
                        let music = art.music.clone();
                        let _ = event_tx.send(MuseumEvent::ArtworkUpdated {
                            artwork: art.clone(),
                        });
                        let mut cmds = Vec::new();
                        audio.on_artwork_changed(Some(&music), sim_ms, &mut cmds);
                        emit_audio(&event_tx, cmds);
                    }
                }
                HallEvent::ArtworkClosed => {
                    close_viewing_session(
                        &mut viewing,
                        &mut world,
                        sim_ms,
                        settings.economy,
                        &event_tx,
                    );
                    let mut cmds = Vec::new();
                    audio.on_artwork_changed(None, sim_ms, &mut cmds);
                    emit_audio(&event_tx, cmds);
                }
                HallEvent::ArtworkCleaned { art_id } => {
                    if let Some(art) = world.artworks.iter_mut().find(|a| a.id == art_id) {
                        economy::clean(art, &mut world.user, clock.now_millis(), settings.economy);
                        let _ = event_tx.send(MuseumEvent::ArtworkUpdated {
                            artwork: art.clone(),
                        });
                        let _ = event_tx.send(MuseumEvent::BalanceUpdated {
                            balance: world.user.balance,
                        });
                    }
                }
                HallEvent::ArtworkSold { art_id } => {
                    if let Some(art) = world.artworks.iter_mut().find(|a| a.id == art_id) {
                        if art.owner != world.user.username {
                            warn!(art_id = %art.id, "sale rejected: user does not own artwork");
                            continue;
                        }
                        economy::sell_to_museum(art, &mut world.user);
                        let _ = event_tx.send(MuseumEvent::ArtworkUpdated {
                            artwork: art.clone(),
                        });
                        let _ = event_tx.send(MuseumEvent::BalanceUpdated {
                            balance: world.user.balance,
                        });
                    }
                }
                HallEvent::AuctionStarted { art_id } => {
                    if auction.is_some() {
                        warn!("auction start rejected: one is already running");
                        continue;
                    }
                    if let Some(art) = world.artworks.iter().find(|a| a.id == art_id) {
                        let session = AuctionSession::open(
                            art,
                            &world.guests,
                            &world.user,
                            settings.auction,
                            &mut rng,
                        );
                        announce_turn(&event_tx, &session);
                        auction = Some(RunningAuction {
                            session,
                            next_action_at_ms: sim_ms + settings.auction.think_delay_ms,
                            settle_at_ms: None,
                        });
                    }
                }
                HallEvent::AuctionBid { amount } => {
                    if let Some(run) = &mut auction {
                        match run.session.user_bid(amount, world.user.balance, &mut rng) {
                            Ok(placed) => {
                                let _ = event_tx.send(MuseumEvent::AuctionBidPlaced {
                                    bidder_name: world.user.username.clone(),
                                    amount: placed.amount,
                                });
                                if placed.gavel {
                                    run.settle_at_ms =
                                        Some(sim_ms + settings.auction.settle_delay_ms);
                                } else {
                                    run.next_action_at_ms =
                                        sim_ms + settings.auction.think_delay_ms;
                                    announce_turn(&event_tx, &run.session);
                                }
                            }
                            Err(err) => {
                                let _ = event_tx.send(MuseumEvent::BidRejected {
                                    reason: err.to_string(),
                                });
                            }
                        }
                    }
                }
                HallEvent::AuctionPassed => {
                    if let Some(run) = &mut auction {
                        match run.session.user_pass() {
                            Ok(()) => {
                                let _ = event_tx.send(MuseumEvent::AuctionPassed {
                                    bidder_name: world.user.username.clone(),
                                });
                                run.next_action_at_ms = sim_ms + settings.auction.think_delay_ms;
                                announce_turn(&event_tx, &run.session);
                            }
                            Err(err) => {
                                let _ = event_tx.send(MuseumEvent::BidRejected {
                                    reason: err.to_string(),
                                });
                            }
                        }
                    }
                }
                HallEvent::AuctionCancelled => {
                    // Once the gavel has fallen the settlement is owed.
                    let cancellable = auction
                        .as_ref()
                        .is_some_and(|run| run.settle_at_ms.is_none());
                    if cancellable {
                        auction = None;
                        info!("auction cancelled");
                    }
                }
                HallEvent::VolumeChanged { volume } => {
                    world.volume = volume;
                    let mut cmds = Vec::new();
                    audio.set_volume(volume, &mut cmds);
                    emit_audio(&event_tx, cmds);
                }
                HallEvent::GlobalMusicChanged { source } => {
                    world.global_music = source.clone();
                    let mut cmds = Vec::new();
                    audio.set_global_source(source, sim_ms, &mut cmds);
                    emit_audio(&event_tx, cmds);
                }
            }
        }

        // Provider results; discard anything from a previous roster.
        while let Ok(outcome) = critique_rx.try_recv() {
            if outcome.generation != generation {
                continue;
            }
            pending_critiques.remove(&outcome.guest_id);
            // A failed generation leaves the guest's daily slot intact.
            let Some(text) = outcome.text else {
                continue;
            };
            quota.mark_complete(&outcome.guest_id, &guest_pool, &mut rng).await;
            if let Some(art) = world.artworks.iter_mut().find(|a| a.id == outcome.art_id) {
                art.critiques.insert(
                    0,
                    Critique {
                        guest_name: outcome.guest_name.clone(),
                        text: text.clone(),
                    },
                );
                let _ = event_tx.send(MuseumEvent::ArtworkUpdated {
                    artwork: art.clone(),
                });
            }
            if let Some(guest) = world.guests.iter_mut().find(|g| g.id == outcome.guest_id) {
                guest.critique_history.push(CritiqueMemory {
                    art_id: outcome.art_id.clone(),
                    art_title: outcome.art_title.clone(),
                    text: text.clone(),
                });
            }
            if let Some(sim) = sims.iter_mut().find(|s| s.guest_id == outcome.guest_id) {
                sim.message = Some(text.clone());
                sim.message_until_ms = sim_ms + settings.guest.message_duration_ms;
            }
            let _ = event_tx.send(MuseumEvent::CritiqueSpoken {
                guest_id: outcome.guest_id,
                guest_name: outcome.guest_name,
                art_id: outcome.art_id,
                text,
                fresh: true,
            });
        }

        // Movement and arrivals.
        let width = wandering::hall_width(world.artworks.len());
        let wander_cfg = wandering::WanderConfig {
            walk_speed: settings.guest.walk_speed,
            arrive_threshold: settings.guest.arrive_threshold,
            min_x: settings.guest.hall_margin,
            max_x: width - settings.guest.hall_margin,
        };
        for sim in &mut sims {
            match sim.activity {
                Activity::Walking => {
                    if wandering::tick_walk(sim, dt, wander_cfg) == wandering::WalkOutcome::Moving {
                        continue;
                    }
                    let Some(art) =
                        wandering::artwork_near(&world.artworks, sim.x, settings.guest.art_proximity)
                    else {
                        sim.target_x =
                            wandering::random_target(&mut rng, wander_cfg.min_x, wander_cfg.max_x);
                        continue;
                    };
                    sim.activity = Activity::Viewing;
                    sim.viewing_art_id = Some(art.id.clone());
                    sim.facing_right = art.anchor_x >= sim.x;
                    sim.dwell_until_ms = sim_ms
                        + rng.gen_range(settings.guest.dwell_min_ms..=settings.guest.dwell_max_ms);

                    let Some(guest) = world.guests.iter().find(|g| g.id == sim.guest_id) else {
                        continue;
                    };
                    if art.cast.contains(&guest.id) {
                        sim.hearting = true;
                        sim.heart_until_ms = sim_ms + settings.guest.heart_duration_ms;
                    }

                    // Replaying an earlier impression costs nothing and is
                    // not gated by the daily allotment.
                    let memories: Vec<&CritiqueMemory> = guest
                        .critique_history
                        .iter()
                        .filter(|m| m.art_id == art.id)
                        .collect();
                    if !memories.is_empty() && rng.gen_bool(settings.guest.replay_probability) {
                        let memory = memories[rng.gen_range(0..memories.len())];
                        sim.message = Some(memory.text.clone());
                        sim.message_until_ms = sim_ms + settings.guest.message_duration_ms;
                        let _ = event_tx.send(MuseumEvent::CritiqueSpoken {
                            guest_id: guest.id.clone(),
                            guest_name: guest.name.clone(),
                            art_id: art.id.clone(),
                            text: memory.text.clone(),
                            fresh: false,
                        });
                        continue;
                    }
                    if !guest.is_critique_active {
                        continue;
                    }
                    if pending_critiques.contains(&guest.id) {
                        continue;
                    }
                    if !quota.can_critique(&guest.id, &guest_pool, &mut rng).await {
                        continue;
                    }
                    pending_critiques.insert(guest.id.clone());
                    spawn_critique(
                        Arc::clone(&provider),
                        critique_tx.clone(),
                        art,
                        guest,
                        generation,
                    );
                }
                Activity::Viewing => {
                    if sim_ms >= sim.dwell_until_ms {
                        sim.activity = Activity::Walking;
                        sim.viewing_art_id = None;
                        sim.target_x =
                            wandering::random_target(&mut rng, wander_cfg.min_x, wander_cfg.max_x);
                    }
                }
            }
        }

        // Transient display state runs out on its deadlines.
        for sim in &mut sims {
            if sim.message.is_some() && sim_ms >= sim.message_until_ms {
                sim.message = None;
            }
            if sim.hearting && sim_ms >= sim.heart_until_ms {
                sim.hearting = false;
            }
        }

        // Periodically every walking guest with a memory reminisces.
        if sim_ms >= next_recall_at_ms {
            next_recall_at_ms += settings.guest.recall_interval_ms;
            recall_sweep(&mut sims, &world.guests, sim_ms, &settings.guest, &mut rng, &event_tx);
        }

        // Auction deadlines.
        let mut settle_now = false;
        if let Some(run) = &mut auction {
            if let Some(settle_at) = run.settle_at_ms {
                settle_now = sim_ms >= settle_at;
            } else if !run.session.is_user_turn() && sim_ms >= run.next_action_at_ms {
                match run.session.ai_turn(&mut rng) {
                    TurnAction::Bid { amount, gavel } => {
                        // The bidder who acted is no longer current; after a
                        // bid it is whoever holds the standing bid.
                        let _ = event_tx.send(MuseumEvent::AuctionBidPlaced {
                            bidder_name: run.session.leading_bidder().to_string(),
                            amount,
                        });
                        if gavel {
                            run.settle_at_ms = Some(sim_ms + settings.auction.settle_delay_ms);
                        } else {
                            run.next_action_at_ms = sim_ms + settings.auction.think_delay_ms;
                            announce_turn(&event_tx, &run.session);
                        }
                    }
                    TurnAction::Pass => {
                        run.next_action_at_ms = sim_ms + settings.auction.think_delay_ms;
                        announce_turn(&event_tx, &run.session);
                    }
                }
            }
        }
        if settle_now {
            if let Some(run) = auction.take() {
                settle_auction(&mut world, &run, &event_tx);
            }
        }

        // Audio fades.
        let mut cmds = Vec::new();
        audio.tick(sim_ms, &mut cmds);
        emit_audio(&event_tx, cmds);

        tick += 1;
        let guests: Vec<GuestView> = sims.iter().map(GuestView::from).collect();
        let _ = hall_tx.send(HallUpdate { tick, guests });
    }
}

fn place_anchors(artworks: &mut [Artwork]) {
    for (i, art) in artworks.iter_mut().enumerate() {
        art.anchor_x = wandering::artwork_anchor(i);
    }
}

fn spawn_sims(
    guests: &[Guest],
    generation: u64,
    artwork_count: usize,
    settings: &HallSettings,
    rng: &mut StdRng,
) -> Vec<GuestSim> {
    let width = wandering::hall_width(artwork_count);
    let (min_x, max_x) = (
        settings.guest.hall_margin,
        width - settings.guest.hall_margin,
    );
    guests
        .iter()
        .map(|g| {
            let x = wandering::random_target(rng, min_x, max_x);
            let target_x = wandering::random_target(rng, min_x, max_x);
            let mut sim = GuestSim::new(g.id.clone(), generation, x, target_x);
            sim.facing_right = matches!(g.initial_facing, Facing::Right);
            sim
        })
        .collect()
}

fn close_viewing_session(
    viewing: &mut Option<ViewingSession>,
    world: &mut MuseumWorld,
    sim_ms: u64,
    cfg: EconomyTuning,
    event_tx: &broadcast::Sender<MuseumEvent>,
) {
    let Some(session) = viewing.take() else {
        return;
    };
    let Some(art) = world.artworks.iter_mut().find(|a| a.id == session.art_id) else {
        return;
    };
    let duration_ms = sim_ms.saturating_sub(session.opened_at_ms);
    let receipt = economy::record_viewing(art, duration_ms, &world.user.username, cfg);
    if receipt.blocks_crossed > 0 {
        let _ = event_tx.send(MuseumEvent::ArtworkUpdated {
            artwork: art.clone(),
        });
    }
}

fn spawn_critique(
    provider: Arc<dyn CritiqueProvider>,
    tx: mpsc::UnboundedSender<CritiqueOutcome>,
    art: &Artwork,
    guest: &Guest,
    generation: u64,
) {
    let summary = ArtworkSummary::from(art);
    let persona = GuestPersona::from(guest);
    let outcome = CritiqueOutcome {
        guest_id: guest.id.clone(),
        generation,
        art_id: art.id.clone(),
        art_title: art.title.clone(),
        guest_name: guest.name.clone(),
        text: None,
    };
    tokio::spawn(async move {
        let text = match provider.generate_critique(&summary, &persona).await {
            Ok(text) => Some(text),
            Err(err) => {
                warn!(guest = %outcome.guest_name, error = %err, "critique generation failed");
                None
            }
        };
        let _ = tx.send(CritiqueOutcome { text, ..outcome });
    });
}

/// One recall pass: every walking guest without an active message surfaces a
/// random memory from its critique history.
fn recall_sweep(
    sims: &mut [GuestSim],
    guests: &[Guest],
    sim_ms: u64,
    cfg: &GuestTuning,
    rng: &mut StdRng,
    event_tx: &broadcast::Sender<MuseumEvent>,
) {
    use rand::seq::SliceRandom;

    for sim in sims.iter_mut() {
        if sim.activity != Activity::Walking || sim.message.is_some() {
            continue;
        }
        let Some(guest) = guests.iter().find(|g| g.id == sim.guest_id) else {
            continue;
        };
        let Some(memory) = guest.critique_history.choose(rng) else {
            continue;
        };
        sim.message = Some(memory.text.clone());
        sim.message_until_ms = sim_ms + cfg.recall_message_duration_ms;
        let _ = event_tx.send(MuseumEvent::CritiqueSpoken {
            guest_id: guest.id.clone(),
            guest_name: guest.name.clone(),
            art_id: memory.art_id.clone(),
            text: memory.text.clone(),
            fresh: false,
        });
    }
}

fn announce_turn(event_tx: &broadcast::Sender<MuseumEvent>, session: &AuctionSession) {
    let bidder = session.current_bidder();
    let _ = event_tx.send(MuseumEvent::AuctionTurn {
        bidder_name: bidder.name.clone(),
        is_user_turn: bidder.is_user,
    });
}

fn settle_auction(
    world: &mut MuseumWorld,
    run: &RunningAuction,
    event_tx: &broadcast::Sender<MuseumEvent>,
) {
    let Some(settlement) = run.session.settlement() else {
        return;
    };
    let Some(art) = world
        .artworks
        .iter_mut()
        .find(|a| a.id == run.session.art_id())
    else {
        return;
    };

    let seller = art.owner.clone();
    if settlement.winner_name == world.user.username {
        world.user.balance -= settlement.final_price;
    }
    if seller == world.user.username && settlement.winner_name != world.user.username {
        world.user.balance += settlement.final_price;
    }
    art.owner = settlement.winner_name.clone();
    art.price = settlement.final_price;

    info!(
        art_id = %art.id,
        winner = %settlement.winner_name,
        final_price = settlement.final_price,
        "auction settled"
    );
    let _ = event_tx.send(MuseumEvent::AuctionEnded {
        art_id: art.id.clone(),
        winner_name: settlement.winner_name.clone(),
        final_price: settlement.final_price,
    });
    let _ = event_tx.send(MuseumEvent::ArtworkUpdated {
        artwork: art.clone(),
    });
    let _ = event_tx.send(MuseumEvent::BalanceUpdated {
        balance: world.user.balance,
    });
}

fn emit_audio(event_tx: &broadcast::Sender<MuseumEvent>, cmds: Vec<AudioCommand>) {
    for cmd in cmds {
        let _ = event_tx.send(MuseumEvent::Audio(cmd));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guest_with_memory(id: &str, name: &str, text: &str) -> Guest {
        Guest {
            id: id.to_string(),
            name: name.to_string(),
            avatar: String::new(),
            full_body_image: String::new(),
            personality: String::new(),
            speech_style: String::new(),
            affinity: 50,
            owned_artworks: Vec::new(),
            is_critique_active: false,
            initial_facing: Facing::Right,
            critique_history: vec![CritiqueMemory {
                art_id: "a1".to_string(),
                art_title: "Winter Harbor".to_string(),
                text: text.to_string(),
            }],
        }
    }

    #[test]
    fn recall_sweep_gives_every_walking_guest_with_a_memory_a_message() {
        let guests = vec![
            guest_with_memory("g1", "Iris", "Unforgettable."),
            guest_with_memory("g2", "Theo", "Still my favorite."),
        ];
        let mut sims = vec![
            GuestSim::new("g1".to_string(), 0, 100.0, 200.0),
            GuestSim::new("g2".to_string(), 0, 300.0, 400.0),
        ];
        let mut rng = StdRng::seed_from_u64(1);
        let (event_tx, mut event_rx) = broadcast::channel(16);

        recall_sweep(&mut sims, &guests, 1_000, &GuestTuning::default(), &mut rng, &event_tx);

        assert!(sims.iter().all(|s| s.message.is_some()));
        let mut spoken = 0;
        while let Ok(event) = event_rx.try_recv() {
            if let MuseumEvent::CritiqueSpoken { fresh: false, .. } = event {
                spoken += 1;
            }
        }
        assert_eq!(spoken, 2);
    }

    #[test]
    fn recall_sweep_skips_viewing_guests_and_guests_already_speaking() {
        let guests = vec![
            guest_with_memory("g1", "Iris", "Unforgettable."),
            guest_with_memory("g2", "Theo", "Still my favorite."),
        ];
        let mut sims = vec![
            GuestSim::new("g1".to_string(), 0, 100.0, 200.0),
            GuestSim::new("g2".to_string(), 0, 300.0, 400.0),
        ];
        sims[0].activity = Activity::Viewing;
        sims[1].message = Some("Hm.".to_string());
        let mut rng = StdRng::seed_from_u64(1);
        let (event_tx, mut event_rx) = broadcast::channel(16);

        recall_sweep(&mut sims, &guests, 1_000, &GuestTuning::default(), &mut rng, &event_tx);

        assert!(sims[0].message.is_none());
        assert_eq!(sims[1].message.as_deref(), Some("Hm."));
        assert!(event_rx.try_recv().is_err());
    }
}
