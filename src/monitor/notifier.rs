use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use serde::Serialize;
use tokio::sync::mpsc::UnboundedSender;

/// Rooms the fleet-wide events are pushed to. Employee dashboards never
/// join these, so they never see other employees' telemetry.
pub const ADMIN_ROOM: &str = "admin";
pub const TEAM_LEAD_ROOM: &str = "tl";

pub const ACTIVITY_UPDATE_EVENT: &str = "activity-update";
pub const APP_INSTALLED_EVENT: &str = "app-installed";

#[derive(Serialize)]
struct Envelope<'a, T: Serialize> {
    event: &'a str,
    data: &'a T,
}

type RoomMap = HashMap<String, HashMap<u64, UnboundedSender<String>>>;
type RoomGuard<'a> = std::sync::MutexGuard<'a, RoomMap>;

/// Subscriber registry: room name -> connected senders. Join, leave and
/// broadcast are its only operations; delivery is fire-and-forget and
/// at-most-once, with closed subscribers pruned on the next broadcast.
#[derive(Default)]
pub struct RoomRegistry {
    next_id: AtomicU64,
    rooms: Mutex<RoomMap>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hands out a process-unique connection id.
    pub fn allocate_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Recovers from poisoning: every critical section leaves the map
    /// consistent, so broadcasts continue after a panicked lock holder.
    fn lock_rooms(&self) -> RoomGuard<'_> {
        self.rooms.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Subscribes a connection to a room, creating the room on first join.
    /// Joining the same room twice just replaces the sender.
    pub fn join(&self, room: &str, conn_id: u64, tx: UnboundedSender<String>) {
        let mut rooms = self.lock_rooms();
        rooms.entry(room.to_string()).or_default().insert(conn_id, tx);
        log::info!("connection {} joined {} room", conn_id, room);
    }

    /// Drops a connection from every room it joined. Empty rooms are
    /// removed so the map does not grow with role strings seen once.
    pub fn leave(&self, conn_id: u64) {
        let mut rooms = self.lock_rooms();
        for members in rooms.values_mut() {
            members.remove(&conn_id);
        }
        rooms.retain(|_, members| !members.is_empty());
    }

    /// Sends a message to every live subscriber of one room, returning how
    /// many accepted it. Subscribers whose channel has closed are dropped.
    pub fn broadcast(&self, room: &str, message: &str) -> usize {
        let mut rooms = self.lock_rooms();
        let Some(members) = rooms.get_mut(room) else {
            return 0;
        };
        members.retain(|_, tx| tx.send(message.to_string()).is_ok());
        members.len()
    }

    /// Fans an event out to the admin and team-lead rooms.
    pub fn notify_dashboards<T: Serialize>(&self, event: &str, data: &T) {
        let envelope = Envelope { event, data };
        let message = match serde_json::to_string(&envelope) {
            Ok(m) => m,
            Err(e) => {
                log::error!("failed to serialize {} event: {}", event, e);
                return;
            }
        };
        let delivered =
            self.broadcast(ADMIN_ROOM, &message) + self.broadcast(TEAM_LEAD_ROOM, &message);
        log::debug!("{} delivered to {} dashboard(s)", event, delivered);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::unbounded_channel;

    #[test]
    fn joined_rooms_receive_every_broadcast() {
        let registry = RoomRegistry::new();
        let (tl_tx, mut tl_rx) = unbounded_channel();
        let (other_tx, mut other_rx) = unbounded_channel();

        let tl_conn = registry.allocate_id();
        registry.join(TEAM_LEAD_ROOM, tl_conn, tl_tx);
        let other_conn = registry.allocate_id();
        registry.join("employee", other_conn, other_tx);

        registry.notify_dashboards(ACTIVITY_UPDATE_EVENT, &serde_json::json!({"n": 1}));
        registry.notify_dashboards(APP_INSTALLED_EVENT, &serde_json::json!({"n": 2}));

        let first = tl_rx.try_recv().unwrap();
        assert!(first.contains(ACTIVITY_UPDATE_EVENT));
        let second = tl_rx.try_recv().unwrap();
        assert!(second.contains(APP_INSTALLED_EVENT));
        assert!(tl_rx.try_recv().is_err());

        // Never joined admin/tl: sees nothing.
        assert!(other_rx.try_recv().is_err());
    }

    #[test]
    fn unjoined_connections_receive_nothing() {
        let registry = RoomRegistry::new();
        let (_tx, mut rx) = unbounded_channel::<String>();
        let _conn = registry.allocate_id();

        registry.notify_dashboards(ACTIVITY_UPDATE_EVENT, &serde_json::json!({}));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn leave_stops_delivery() {
        let registry = RoomRegistry::new();
        let (tx, mut rx) = unbounded_channel();
        let conn = registry.allocate_id();
        registry.join(ADMIN_ROOM, conn, tx);

        assert_eq!(registry.broadcast(ADMIN_ROOM, "one"), 1);
        registry.leave(conn);
        assert_eq!(registry.broadcast(ADMIN_ROOM, "two"), 0);

        assert_eq!(rx.try_recv().unwrap(), "one");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn broadcasts_survive_a_poisoned_lock() {
        use std::sync::Arc;

        let registry = Arc::new(RoomRegistry::new());
        let (tx, mut rx) = unbounded_channel();
        let conn = registry.allocate_id();
        registry.join(ADMIN_ROOM, conn, tx);

        let holder = Arc::clone(&registry);
        let _ = std::thread::spawn(move || {
            let _guard = holder.rooms.lock().unwrap();
            panic!("poison the registry lock");
        })
        .join();

        assert_eq!(registry.broadcast(ADMIN_ROOM, "still-delivering"), 1);
        assert_eq!(rx.try_recv().unwrap(), "still-delivering");
    }

    #[test]
    fn closed_subscribers_are_pruned() {
        let registry = RoomRegistry::new();
        let (tx, rx) = unbounded_channel();
        let conn = registry.allocate_id();
        registry.join(ADMIN_ROOM, conn, tx);
        drop(rx);

        assert_eq!(registry.broadcast(ADMIN_ROOM, "gone"), 0);
    }
}
