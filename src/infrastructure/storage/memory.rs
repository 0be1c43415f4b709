//! In-memory repository implementations
//!
//! Mirrors the constraints of the SQL schema so services behave the same on
//! either backend: unique start times, unique member emails, one reservation
//! per (date, time, theme) and restricted deletes of referenced rows.
//!
//! Lock order is times, themes, reservation_slots, reservations. A delete
//! holds the parent's entry while scanning reservations and a save holds
//! read guards on both parents until the row is inserted, so the two can
//! never interleave into an orphaned reservation.

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::domain::{
    DomainError, DomainResult, Member, MemberRepository, RepositoryProvider, Reservation,
    ReservationRepository, ReservationTime, ReservationTimeRepository, Theme, ThemeRepository,
};

type Slot = (NaiveDate, i32, i32);

/// Stored form of a reservation; time and theme are joined on read.
#[derive(Debug, Clone)]
struct ReservationRow {
    id: i32,
    name: String,
    date: NaiveDate,
    time_id: i32,
    theme_id: i32,
}

impl ReservationRow {
    fn slot(&self) -> Slot {
        (self.date, self.time_id, self.theme_id)
    }
}

/// Shared tables behind every in-memory repository
struct MemoryStore {
    members: DashMap<i32, Member>,
    member_emails: DashMap<String, i32>,
    times: DashMap<i32, ReservationTime>,
    time_starts: DashMap<NaiveTime, i32>,
    themes: DashMap<i32, Theme>,
    reservations: DashMap<i32, ReservationRow>,
    reservation_slots: DashMap<Slot, i32>,
    member_counter: AtomicI32,
    time_counter: AtomicI32,
    theme_counter: AtomicI32,
    reservation_counter: AtomicI32,
}

impl MemoryStore {
    fn new() -> Self {
        Self {
            members: DashMap::new(),
            member_emails: DashMap::new(),
            times: DashMap::new(),
            time_starts: DashMap::new(),
            themes: DashMap::new(),
            reservations: DashMap::new(),
            reservation_slots: DashMap::new(),
            member_counter: AtomicI32::new(1),
            time_counter: AtomicI32::new(1),
            theme_counter: AtomicI32::new(1),
            reservation_counter: AtomicI32::new(1),
        }
    }

    fn join(&self, row: &ReservationRow) -> Option<Reservation> {
        let time = self.times.get(&row.time_id)?.clone();
        let theme = self.themes.get(&row.theme_id)?.clone();
        Some(Reservation {
            id: row.id,
            name: row.name.clone(),
            date: row.date,
            time,
            theme,
        })
    }

    fn reservations_where(&self, pred: impl Fn(&ReservationRow) -> bool) -> Vec<Reservation> {
        let mut rows: Vec<ReservationRow> = self
            .reservations
            .iter()
            .filter(|e| pred(e.value()))
            .map(|e| e.value().clone())
            .collect();
        rows.sort_by_key(|r| r.id);
        rows.iter().filter_map(|r| self.join(r)).collect()
    }

    fn any_reservation(&self, pred: impl Fn(&ReservationRow) -> bool) -> bool {
        self.reservations.iter().any(|e| pred(e.value()))
    }
}

fn sorted_by_id<T: Clone>(map: &DashMap<i32, T>) -> Vec<T> {
    let mut entries: Vec<(i32, T)> = map.iter().map(|e| (*e.key(), e.value().clone())).collect();
    entries.sort_by_key(|(id, _)| *id);
    entries.into_iter().map(|(_, v)| v).collect()
}

// ── Provider ────────────────────────────────────────────────────

/// Repository provider backed by process memory.
///
/// Used by `--in-memory` runs and by service tests. Data is lost when the
/// provider is dropped.
pub struct InMemoryRepositoryProvider {
    members: InMemoryMemberRepository,
    reservation_times: InMemoryReservationTimeRepository,
    themes: InMemoryThemeRepository,
    reservations: InMemoryReservationRepository,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            members: InMemoryMemberRepository {
                store: store.clone(),
            },
            reservation_times: InMemoryReservationTimeRepository {
                store: store.clone(),
            },
            themes: InMemoryThemeRepository {
                store: store.clone(),
            },
            reservations: InMemoryReservationRepository { store },
        }
    }
}

impl Default for InMemoryRepositoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositoryProvider for InMemoryRepositoryProvider {
    fn members(&self) -> &dyn MemberRepository {
        &self.members
    }

    fn reservation_times(&self) -> &dyn ReservationTimeRepository {
        &self.reservation_times
    }

    fn themes(&self) -> &dyn ThemeRepository {
        &self.themes
    }

    fn reservations(&self) -> &dyn ReservationRepository {
        &self.reservations
    }
}

// ── Members ─────────────────────────────────────────────────────

pub struct InMemoryMemberRepository {
    store: Arc<MemoryStore>,
}

#[async_trait]
impl MemberRepository for InMemoryMemberRepository {
    async fn save(&self, mut member: Member) -> DomainResult<Member> {
        match self.store.member_emails.entry(member.email.clone()) {
            Entry::Occupied(_) => {
                return Err(DomainError::Conflict(format!(
                    "member email {} is already registered",
                    member.email
                )))
            }
            Entry::Vacant(slot) => {
                member.id = self.store.member_counter.fetch_add(1, Ordering::SeqCst);
                slot.insert(member.id);
            }
        }
        self.store.members.insert(member.id, member.clone());
        Ok(member)
    }

    async fn find_all(&self) -> DomainResult<Vec<Member>> {
        Ok(sorted_by_id(&self.store.members))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Member>> {
        Ok(self.store.members.get(&id).map(|m| m.clone()))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Member>> {
        let Some(id) = self.store.member_emails.get(email).map(|e| *e) else {
            return Ok(None);
        };
        Ok(self.store.members.get(&id).map(|m| m.clone()))
    }
}

// ── Reservation times ───────────────────────────────────────────

pub struct InMemoryReservationTimeRepository {
    store: Arc<MemoryStore>,
}

#[async_trait]
impl ReservationTimeRepository for InMemoryReservationTimeRepository {
    async fn save(&self, mut time: ReservationTime) -> DomainResult<ReservationTime> {
        match self.store.time_starts.entry(time.start_at) {
            Entry::Occupied(_) => {
                return Err(DomainError::Conflict(format!(
                    "reservation time {} already exists",
                    time.start_at.format("%H:%M")
                )))
            }
            Entry::Vacant(slot) => {
                time.id = self.store.time_counter.fetch_add(1, Ordering::SeqCst);
                slot.insert(time.id);
            }
        }
        self.store.times.insert(time.id, time.clone());
        Ok(time)
    }

    async fn find_all(&self) -> DomainResult<Vec<ReservationTime>> {
        Ok(sorted_by_id(&self.store.times))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<ReservationTime>> {
        Ok(self.store.times.get(&id).map(|t| t.clone()))
    }

    async fn exists_by_id(&self, id: i32) -> DomainResult<bool> {
        Ok(self.store.times.contains_key(&id))
    }

    async fn exists_by_start_at(&self, start_at: NaiveTime) -> DomainResult<bool> {
        Ok(self.store.time_starts.contains_key(&start_at))
    }

    async fn delete_by_id(&self, id: i32) -> DomainResult<()> {
        let Entry::Occupied(entry) = self.store.times.entry(id) else {
            return Ok(());
        };
        if self.store.any_reservation(|r| r.time_id == id) {
            return Err(DomainError::Conflict(format!(
                "reservation time {} is still referenced",
                id
            )));
        }
        let (_, time) = entry.remove_entry();
        self.store.time_starts.remove(&time.start_at);
        Ok(())
    }
}

// ── Themes ──────────────────────────────────────────────────────

pub struct InMemoryThemeRepository {
    store: Arc<MemoryStore>,
}

#[async_trait]
impl ThemeRepository for InMemoryThemeRepository {
    async fn save(&self, mut theme: Theme) -> DomainResult<Theme> {
        theme.id = self.store.theme_counter.fetch_add(1, Ordering::SeqCst);
        self.store.themes.insert(theme.id, theme.clone());
        Ok(theme)
    }

    async fn find_all(&self) -> DomainResult<Vec<Theme>> {
        Ok(sorted_by_id(&self.store.themes))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Theme>> {
        Ok(self.store.themes.get(&id).map(|t| t.clone()))
    }

    async fn exists_by_id(&self, id: i32) -> DomainResult<bool> {
        Ok(self.store.themes.contains_key(&id))
    }

    async fn find_popular(&self, limit: u64) -> DomainResult<Vec<Theme>> {
        let mut ranked: Vec<(usize, Theme)> = sorted_by_id(&self.store.themes)
            .into_iter()
            .map(|theme| {
                let count = self
                    .store
                    .reservations
                    .iter()
                    .filter(|r| r.theme_id == theme.id)
                    .count();
                (count, theme)
            })
            .collect();
        // stable sort keeps id order among equal counts
        ranked.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(ranked
            .into_iter()
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .map(|(_, theme)| theme)
            .collect())
    }

    async fn delete_by_id(&self, id: i32) -> DomainResult<()> {
        let Entry::Occupied(entry) = self.store.themes.entry(id) else {
            return Ok(());
        };
        if self.store.any_reservation(|r| r.theme_id == id) {
            return Err(DomainError::Conflict(format!(
                "theme {} is still referenced",
                id
            )));
        }
        entry.remove();
        Ok(())
    }
}

// ── Reservations ────────────────────────────────────────────────

pub struct InMemoryReservationRepository {
    store: Arc<MemoryStore>,
}

#[async_trait]
impl ReservationRepository for InMemoryReservationRepository {
    async fn save(&self, reservation: Reservation) -> DomainResult<Reservation> {
        // guards pin both parents until the row is in place
        let (Some(_time), Some(_theme)) = (
            self.store.times.get(&reservation.time.id),
            self.store.themes.get(&reservation.theme.id),
        ) else {
            return Err(DomainError::Conflict(
                "reservation references a missing time or theme".into(),
            ));
        };

        let mut row = ReservationRow {
            id: 0,
            name: reservation.name.clone(),
            date: reservation.date,
            time_id: reservation.time.id,
            theme_id: reservation.theme.id,
        };
        match self.store.reservation_slots.entry(row.slot()) {
            Entry::Occupied(_) => {
                return Err(DomainError::Conflict(format!(
                    "slot on {} is already booked",
                    row.date
                )))
            }
            Entry::Vacant(slot) => {
                row.id = self
                    .store
                    .reservation_counter
                    .fetch_add(1, Ordering::SeqCst);
                slot.insert(row.id);
            }
        }
        let id = row.id;
        self.store.reservations.insert(id, row);
        Ok(Reservation { id, ..reservation })
    }

    async fn find_all(&self) -> DomainResult<Vec<Reservation>> {
        Ok(self.store.reservations_where(|_| true))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Reservation>> {
        let Some(row) = self.store.reservations.get(&id).map(|r| r.clone()) else {
            return Ok(None);
        };
        Ok(self.store.join(&row))
    }

    async fn find_all_by_time_id(&self, time_id: i32) -> DomainResult<Vec<Reservation>> {
        Ok(self.store.reservations_where(|r| r.time_id == time_id))
    }

    async fn find_all_by_theme_id(&self, theme_id: i32) -> DomainResult<Vec<Reservation>> {
        Ok(self.store.reservations_where(|r| r.theme_id == theme_id))
    }

    async fn find_all_by_date_and_theme_id(
        &self,
        date: NaiveDate,
        theme_id: i32,
    ) -> DomainResult<Vec<Reservation>> {
        Ok(self
            .store
            .reservations_where(|r| r.date == date && r.theme_id == theme_id))
    }

    async fn exists_by_id(&self, id: i32) -> DomainResult<bool> {
        Ok(self.store.reservations.contains_key(&id))
    }

    async fn exists_by_time_id(&self, time_id: i32) -> DomainResult<bool> {
        Ok(self.store.any_reservation(|r| r.time_id == time_id))
    }

    async fn exists_by_theme_id(&self, theme_id: i32) -> DomainResult<bool> {
        Ok(self.store.any_reservation(|r| r.theme_id == theme_id))
    }

    async fn exists_by_date_and_time_and_theme(
        &self,
        date: NaiveDate,
        time_id: i32,
        theme_id: i32,
    ) -> DomainResult<bool> {
        Ok(self
            .store
            .reservation_slots
            .contains_key(&(date, time_id, theme_id)))
    }

    async fn delete_by_id(&self, id: i32) -> DomainResult<()> {
        if let Some((_, row)) = self.store.reservations.remove(&id) {
            self.store.reservation_slots.remove(&row.slot());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, 0, 0).unwrap()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, d).unwrap()
    }

    async fn seeded() -> (InMemoryRepositoryProvider, ReservationTime, Theme) {
        let repos = InMemoryRepositoryProvider::new();
        let time = repos
            .reservation_times()
            .save(ReservationTime::new(at(10)))
            .await
            .unwrap();
        let theme = repos
            .themes()
            .save(Theme::new("mark", "desc", "thumb"))
            .await
            .unwrap();
        (repos, time, theme)
    }

    #[tokio::test]
    async fn ids_are_assigned_per_table() {
        let (repos, time, theme) = seeded().await;
        assert_eq!(time.id, 1);
        assert_eq!(theme.id, 1);

        let second = repos
            .reservation_times()
            .save(ReservationTime::new(at(11)))
            .await
            .unwrap();
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn duplicate_start_at_is_a_conflict() {
        let (repos, _, _) = seeded().await;
        let err = repos
            .reservation_times()
            .save(ReservationTime::new(at(10)))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn reservations_join_time_and_theme() {
        let (repos, time, theme) = seeded().await;
        let saved = repos
            .reservations()
            .save(Reservation::new("brown", day(1), time.clone(), theme.clone()))
            .await
            .unwrap();

        let found = repos.reservations().find_by_id(saved.id).await.unwrap();
        assert_eq!(found, Some(saved));
        assert!(repos
            .reservations()
            .exists_by_date_and_time_and_theme(day(1), time.id, theme.id)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn double_booking_is_a_conflict() {
        let (repos, time, theme) = seeded().await;
        let book = |name: &'static str| Reservation::new(name, day(1), time.clone(), theme.clone());

        repos.reservations().save(book("a")).await.unwrap();
        let err = repos.reservations().save(book("b")).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn referenced_rows_cannot_be_deleted() {
        let (repos, time, theme) = seeded().await;
        let saved = repos
            .reservations()
            .save(Reservation::new("a", day(1), time.clone(), theme.clone()))
            .await
            .unwrap();

        assert!(repos.reservation_times().delete_by_id(time.id).await.is_err());
        assert!(repos.themes().delete_by_id(theme.id).await.is_err());

        repos.reservations().delete_by_id(saved.id).await.unwrap();
        repos.reservation_times().delete_by_id(time.id).await.unwrap();
        repos.themes().delete_by_id(theme.id).await.unwrap();
        assert!(!repos.reservation_times().exists_by_start_at(at(10)).await.unwrap());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_save_and_delete_never_orphan_a_reservation() {
        for round in 0..50 {
            let (repos, time, theme) = seeded().await;
            let repos = Arc::new(repos);

            let saver = {
                let repos = repos.clone();
                tokio::spawn(async move {
                    repos
                        .reservations()
                        .save(Reservation::new("a", day(1), time, theme))
                        .await
                })
            };
            let deleter = {
                let repos = repos.clone();
                tokio::spawn(async move { repos.reservation_times().delete_by_id(1).await })
            };
            let saved = saver.await.unwrap();
            let deleted = deleter.await.unwrap();

            // exactly one side wins
            assert_ne!(saved.is_ok(), deleted.is_ok(), "round {round}");
            let stored = repos.reservations.store.reservations.len();
            let listed = repos.reservations().find_all().await.unwrap().len();
            assert_eq!(stored, listed, "round {round}");
        }
    }

    #[tokio::test]
    async fn freed_slot_can_be_booked_again() {
        let (repos, time, theme) = seeded().await;
        let first = repos
            .reservations()
            .save(Reservation::new("a", day(1), time.clone(), theme.clone()))
            .await
            .unwrap();
        repos.reservations().delete_by_id(first.id).await.unwrap();

        let again = repos
            .reservations()
            .save(Reservation::new("b", day(1), time, theme))
            .await
            .unwrap();
        assert_eq!(again.id, 2);
    }

    #[tokio::test]
    async fn popular_themes_rank_by_count_then_id() {
        let (repos, time, first) = seeded().await;
        let second = repos
            .themes()
            .save(Theme::new("pobi", "desc", "thumb"))
            .await
            .unwrap();
        let third = repos
            .themes()
            .save(Theme::new("brown", "desc", "thumb"))
            .await
            .unwrap();
        for d in 1..=2 {
            repos
                .reservations()
                .save(Reservation::new("x", day(d), time.clone(), third.clone()))
                .await
                .unwrap();
        }

        let popular = repos.themes().find_popular(10).await.unwrap();
        assert_eq!(popular, vec![third, first.clone(), second]);
        assert_eq!(repos.themes().find_popular(1).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let repos = InMemoryRepositoryProvider::new();
        repos
            .members()
            .save(Member::new("a", "a@email.com", "h"))
            .await
            .unwrap();
        let err = repos
            .members()
            .save(Member::new("b", "a@email.com", "h"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        assert!(repos.members().find_by_email("a@email.com").await.unwrap().is_some());
    }
}
