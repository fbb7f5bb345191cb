//! Food details screen
//!
//! One mounted session per food id. Loaders run as tokio tasks and only
//! write back into the session they were started for: every mount bumps a
//! generation counter and owns a [`CancellationToken`], and `unmount()`
//! cancels it. Lock sections never span an `.await`.

use super::events::ScreenEvent;
use super::state::{
    FoodDetailsState, FoodDetailsView, LoadFailure, LoadStatus, Notice, Operation, OrderStatus,
    ScreenPhase,
};
use crate::api::FoodApi;
use crate::client::HttpClient;
use crate::config::{FavoriteLookup, ScreenOptions};
use crate::error::{ClientError, ScreenError, ScreenResult};
use crate::navigation::{Destination, HeaderAction, Navigator};
use shared::{ExtraId, FoodId, OrderPayload};
use std::sync::{Arc, PoisonError, RwLock, RwLockWriteGuard};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

const EVENT_CHANNEL_CAPACITY: usize = 64;

struct Session {
    generation: u64,
    cancel: CancellationToken,
    state: FoodDetailsState,
}

impl Session {
    /// Still loading, editable or waiting on its order
    fn is_live(&self) -> bool {
        matches!(
            self.state.phase(),
            ScreenPhase::Loading | ScreenPhase::Loaded | ScreenPhase::Submitting
        )
    }
}

#[derive(Default)]
struct Inner {
    last_generation: u64,
    session: Option<Session>,
}

/// Headless food details screen
///
/// Cheap to clone; clones share the same session.
///
/// # Example
///
/// ```ignore
/// let screen = FoodDetailsScreen::new(api, Arc::new(LogNavigator), ScreenOptions::default());
/// screen.mount(42).wait().await;
/// screen.increment_extra(1)?;
/// screen.finish_order().await?;
/// ```
pub struct FoodDetailsScreen<C, N> {
    api: FoodApi<C>,
    navigator: Arc<N>,
    options: ScreenOptions,
    inner: Arc<RwLock<Inner>>,
    events: broadcast::Sender<ScreenEvent>,
}

impl<C, N> Clone for FoodDetailsScreen<C, N> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            navigator: Arc::clone(&self.navigator),
            options: self.options.clone(),
            inner: Arc::clone(&self.inner),
            events: self.events.clone(),
        }
    }
}

/// Loader tasks started by `mount` or `retry_load`
///
/// Dropping the handle detaches the tasks; they still honor unmount.
#[derive(Debug, Default)]
pub struct LoadHandle {
    tasks: Vec<JoinHandle<()>>,
}

impl LoadHandle {
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Wait until every loader has delivered (or discarded) its result
    pub async fn wait(self) {
        for task in self.tasks {
            if let Err(e) = task.await {
                warn!(error = %e, "Loader task did not complete");
            }
        }
    }
}

impl<C, N> FoodDetailsScreen<C, N>
where
    C: HttpClient + 'static,
    N: Navigator + 'static,
{
    pub fn new(api: FoodApi<C>, navigator: Arc<N>, options: ScreenOptions) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            api,
            navigator,
            options,
            inner: Arc::new(RwLock::new(Inner::default())),
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ScreenEvent> {
        self.events.subscribe()
    }

    pub fn options(&self) -> &ScreenOptions {
        &self.options
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(&self, event: ScreenEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }

    /// Run `f` against the session started as `generation`, if it is still current
    fn with_session<R>(
        &self,
        generation: u64,
        f: impl FnOnce(&mut FoodDetailsState) -> R,
    ) -> Option<R> {
        let mut inner = self.write();
        match inner.session.as_mut() {
            Some(session) if session.generation == generation && !session.cancel.is_cancelled() => {
                Some(f(&mut session.state))
            }
            _ => None,
        }
    }

    /// Run `f` against the current session
    fn with_current<R>(
        &self,
        f: impl FnOnce(&mut Session) -> ScreenResult<R>,
    ) -> ScreenResult<R> {
        let mut inner = self.write();
        let session = inner.session.as_mut().ok_or(ScreenError::NotMounted)?;
        f(session)
    }

    // ========== Lifecycle ==========

    /// Mount the screen for `food_id` and start both loaders
    ///
    /// Mounting the id that is already mounted is a no-op and returns an
    /// empty handle while that session is still loading or being edited.
    /// A different id, a failed load or a submitted order starts a fresh
    /// session.
    pub fn mount(&self, food_id: FoodId) -> LoadHandle {
        let (generation, cancel) = {
            let mut inner = self.write();
            if let Some(session) = &inner.session {
                if session.state.food_id() == food_id && session.is_live() {
                    return LoadHandle::default();
                }
                session.cancel.cancel();
            }

            inner.last_generation += 1;
            let generation = inner.last_generation;
            let cancel = CancellationToken::new();
            inner.session = Some(Session {
                generation,
                cancel: cancel.clone(),
                state: FoodDetailsState::new(food_id, self.options.max_quantity),
            });
            (generation, cancel)
        };

        info!(food_id, generation, "Mounting food details");
        self.navigator.set_header_action(HeaderAction::favorite(false));
        self.spawn_loads(food_id, generation, cancel, true, true)
    }

    /// Leave the screen; in-flight loads are cancelled and late results dropped
    pub fn unmount(&self) {
        let session = self.write().session.take();
        if let Some(session) = session {
            session.cancel.cancel();
            info!(
                food_id = session.state.food_id(),
                generation = session.generation,
                phase = ?session.state.phase(),
                "Unmounted food details"
            );
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .session
            .is_some()
    }

    /// Re-run the loaders that failed
    pub fn retry_load(&self) -> ScreenResult<LoadHandle> {
        let (food_id, generation, cancel, food, favorite) = self.with_current(|session| {
            let (food, favorite) = session.state.reset_failed_loads();
            Ok((
                session.state.food_id(),
                session.generation,
                session.cancel.clone(),
                food,
                favorite,
            ))
        })?;

        if food || favorite {
            info!(food_id, food, favorite, "Retrying failed loads");
        }
        Ok(self.spawn_loads(food_id, generation, cancel, food, favorite))
    }

    fn spawn_loads(
        &self,
        food_id: FoodId,
        generation: u64,
        cancel: CancellationToken,
        food: bool,
        favorite: bool,
    ) -> LoadHandle {
        let mut tasks = Vec::with_capacity(2);
        if food {
            let screen = self.clone();
            let cancel = cancel.clone();
            tasks.push(tokio::spawn(async move {
                screen.load_food(food_id, generation, cancel).await;
            }));
        }
        if favorite {
            let screen = self.clone();
            tasks.push(tokio::spawn(async move {
                screen.load_favorite_status(food_id, generation, cancel).await;
            }));
        }
        LoadHandle { tasks }
    }

    // ========== Loader ==========

    async fn load_food(&self, food_id: FoodId, generation: u64, cancel: CancellationToken) {
        let result = tokio::select! {
            _ = cancel.cancelled() => {
                debug!(food_id, generation, "Food load cancelled");
                return;
            }
            result = self.api.get_food(food_id) => result,
        };

        let event = self.with_session(generation, |state| match result {
            Ok(food) => {
                debug!(food_id, extras = food.extras.len(), "Food loaded");
                state.apply_food(food);
                ScreenEvent::FoodLoaded { food_id }
            }
            Err(e) => {
                warn!(food_id, kind = e.kind().name(), error = %e, "Failed to load food");
                let kind = e.kind();
                state.fail_food(LoadFailure {
                    kind,
                    message: e.to_string(),
                });
                ScreenEvent::LoadFailed {
                    food_id,
                    operation: Operation::LoadFood,
                    kind,
                }
            }
        });

        match event {
            Some(event) => self.emit(event),
            None => debug!(food_id, generation, "Discarding stale food response"),
        }
    }

    async fn load_favorite_status(
        &self,
        food_id: FoodId,
        generation: u64,
        cancel: CancellationToken,
    ) {
        let lookup = async {
            match self.options.favorite_lookup {
                FavoriteLookup::List => self.api.is_favorite(food_id).await,
                FavoriteLookup::Direct => self.api.get_favorite(food_id).await.map(|f| f.is_some()),
            }
        };

        let result = tokio::select! {
            _ = cancel.cancelled() => {
                debug!(food_id, generation, "Favorite lookup cancelled");
                return;
            }
            result = lookup => result,
        };

        let event = self.with_session(generation, |state| match result {
            Ok(is_favorite) => {
                state.apply_favorite(is_favorite);
                ScreenEvent::FavoriteResolved {
                    food_id,
                    is_favorite,
                }
            }
            Err(e) => {
                warn!(food_id, kind = e.kind().name(), error = %e, "Failed to load favorite status");
                let kind = e.kind();
                state.fail_favorite(LoadFailure {
                    kind,
                    message: e.to_string(),
                });
                ScreenEvent::LoadFailed {
                    food_id,
                    operation: Operation::LoadFavorite,
                    kind,
                }
            }
        });

        match event {
            Some(event) => {
                if let ScreenEvent::FavoriteResolved { is_favorite, .. } = event {
                    self.navigator
                        .set_header_action(HeaderAction::favorite(is_favorite));
                }
                self.emit(event);
            }
            None => debug!(food_id, generation, "Discarding stale favorite status"),
        }
    }

    // ========== Editor ==========

    fn edit(&self, f: impl FnOnce(&mut FoodDetailsState) -> bool) -> ScreenResult<bool> {
        let (changed, food_id, total) = self.with_current(|session| {
            if session.state.order_status() != OrderStatus::Idle {
                return Err(ScreenError::AlreadySubmitted);
            }
            let changed = f(&mut session.state);
            Ok((changed, session.state.food_id(), session.state.total()))
        })?;

        if changed {
            self.emit(ScreenEvent::QuantitiesChanged { food_id, total });
        }
        Ok(changed)
    }

    /// Add one unit of an extra; `Ok(false)` when nothing changed
    pub fn increment_extra(&self, id: ExtraId) -> ScreenResult<bool> {
        self.edit(|state| state.increment_extra(id))
    }

    /// Remove one unit of an extra, never below 0
    pub fn decrement_extra(&self, id: ExtraId) -> ScreenResult<bool> {
        self.edit(|state| state.decrement_extra(id))
    }

    pub fn increment_food(&self) -> ScreenResult<bool> {
        self.edit(FoodDetailsState::increment_food)
    }

    /// Never below 1
    pub fn decrement_food(&self) -> ScreenResult<bool> {
        self.edit(FoodDetailsState::decrement_food)
    }

    /// Flip the favorite flag and sync it with the server
    ///
    /// The flag flips locally before the request and is rolled back if the
    /// request fails. Returns the confirmed flag.
    pub async fn toggle_favorite(&self) -> ScreenResult<bool> {
        let (generation, food_id, snapshot, was_favorite) = self.with_current(|session| {
            if session.state.favorite_pending() {
                return Err(ScreenError::Busy("toggle_favorite"));
            }
            if !matches!(session.state.favorite_status(), LoadStatus::Ready) {
                return Err(ScreenError::NotLoaded);
            }
            let snapshot = session
                .state
                .food()
                .ok_or(ScreenError::NotLoaded)?
                .favorite_snapshot();

            let was_favorite = session.state.is_favorite();
            session.state.set_favorite(!was_favorite);
            session.state.set_favorite_pending(true);
            Ok((
                session.generation,
                session.state.food_id(),
                snapshot,
                was_favorite,
            ))
        })?;

        self.navigator
            .set_header_action(HeaderAction::favorite(!was_favorite));

        let result = if was_favorite {
            self.api.remove_favorite(food_id).await
        } else {
            self.api.add_favorite(&snapshot).await
        };

        match result {
            Ok(()) => {
                self.with_session(generation, |state| state.set_favorite_pending(false));
                info!(food_id, is_favorite = !was_favorite, "Favorite updated");
                self.emit(ScreenEvent::FavoriteChanged {
                    food_id,
                    is_favorite: !was_favorite,
                });
                Ok(!was_favorite)
            }
            Err(e) => {
                warn!(food_id, kind = e.kind().name(), error = %e, "Favorite update failed, rolling back");
                let notice = self.record_failure(generation, Operation::ToggleFavorite, &e, |state| {
                    state.set_favorite(was_favorite);
                    state.set_favorite_pending(false);
                });
                if notice.is_some() {
                    self.navigator
                        .set_header_action(HeaderAction::favorite(was_favorite));
                }
                Err(e.into())
            }
        }
    }

    /// Apply a rollback, record a notice and publish it
    fn record_failure(
        &self,
        generation: u64,
        operation: Operation,
        error: &ClientError,
        rollback: impl FnOnce(&mut FoodDetailsState),
    ) -> Option<Notice> {
        let notice = Notice {
            operation,
            kind: error.kind(),
            message: error.to_string(),
        };
        let recorded = self.with_session(generation, |state| {
            rollback(state);
            state.push_notice(notice.operation, notice.kind, notice.message.clone());
        });
        recorded.map(|()| {
            self.emit(ScreenEvent::Notice(notice.clone()));
            notice
        })
    }

    // ========== Submitter ==========

    /// Post the order and go back to the dashboard
    ///
    /// Returns the payload that was accepted by the server. On failure the
    /// selection is kept so the user can try again.
    pub async fn finish_order(&self) -> ScreenResult<OrderPayload> {
        let omit_zero = self.options.omit_zero_quantity_extras;
        let (generation, payload) = self.with_current(|session| {
            match session.state.order_status() {
                OrderStatus::Submitting => return Err(ScreenError::Busy("finish_order")),
                OrderStatus::Submitted => return Err(ScreenError::AlreadySubmitted),
                OrderStatus::Idle => {}
            }
            let payload = session
                .state
                .order_payload(omit_zero)
                .ok_or(ScreenError::NotLoaded)?;
            session.state.set_order_status(OrderStatus::Submitting);
            Ok((session.generation, payload))
        })?;

        info!(
            food_id = payload.product_id,
            total = %payload.price,
            extras = payload.extras.len(),
            "Placing order"
        );

        match self.api.place_order(&payload).await {
            Ok(created) => {
                let still_mounted = self
                    .with_session(generation, |state| state.set_order_status(OrderStatus::Submitted))
                    .is_some();
                info!(
                    food_id = payload.product_id,
                    order_id = created.as_ref().map(|o| o.id),
                    "Order placed"
                );
                self.emit(ScreenEvent::OrderPlaced {
                    food_id: payload.product_id,
                    total: payload.price,
                });
                if still_mounted {
                    self.navigator.navigate(Destination::Dashboard);
                }
                Ok(payload)
            }
            Err(e) => {
                warn!(food_id = payload.product_id, kind = e.kind().name(), error = %e, "Order failed");
                self.record_failure(generation, Operation::PlaceOrder, &e, |state| {
                    state.set_order_status(OrderStatus::Idle);
                });
                Err(e.into())
            }
        }
    }

    // ========== View ==========

    /// Snapshot for rendering, `None` while unmounted
    pub fn view(&self) -> Option<FoodDetailsView> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner
            .session
            .as_ref()
            .map(|session| session.state.view(&self.options.currency))
    }

    /// Drain notices after the host has displayed them
    pub fn take_notices(&self) -> Vec<Notice> {
        self.with_current(|session| Ok(session.state.take_notices()))
            .unwrap_or_default()
    }
}
