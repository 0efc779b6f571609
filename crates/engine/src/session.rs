//! Session - shared handle around one game
//!
//! The handle is cheap to clone and single-threaded (`Rc`). All state
//! changes go through [`Session::apply_move`] and [`Session::reset`].

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use log::debug;

use crate::core::{Board, GameConfig, GameSnapshot, GameState};
use crate::types::{Direction, GameStatus, MoveEvent, MoveOutcome, Tile, CELL_COUNT};

type Observer = Box<dyn FnMut(&GameSnapshot)>;

struct Inner {
    state: RefCell<GameState>,
    /// Set for the whole move → spawn → game-over → notify sequence.
    busy: Cell<bool>,
    observers: RefCell<Vec<Observer>>,
    /// Observers registered while a notification was running.
    pending: RefCell<Vec<Observer>>,
}

/// Clears the busy flag on every exit path.
struct BusyGuard<'a> {
    flag: &'a Cell<bool>,
}

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a Cell<bool>) -> Option<Self> {
        if flag.replace(true) {
            return None;
        }
        Some(Self { flag })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

/// Shared handle to one game
#[derive(Clone)]
pub struct Session {
    inner: Rc<Inner>,
}

/// Non-owning handle, for observers that need to call back into their session
#[derive(Clone)]
pub struct WeakSession {
    inner: Weak<Inner>,
}

impl WeakSession {
    pub fn upgrade(&self) -> Option<Session> {
        self.inner.upgrade().map(|inner| Session { inner })
    }
}

impl Session {
    pub fn new(config: GameConfig) -> Self {
        Self::from_state(GameState::new(config))
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::from_state(GameState::with_seed(seed))
    }

    pub fn from_state(state: GameState) -> Self {
        Self {
            inner: Rc::new(Inner {
                state: RefCell::new(state),
                busy: Cell::new(false),
                observers: RefCell::new(Vec::new()),
                pending: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn downgrade(&self) -> WeakSession {
        WeakSession {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Register a callback run after every accepted move and every reset
    ///
    /// Callbacks run synchronously, in registration order, before the
    /// triggering call returns.
    pub fn subscribe<F>(&self, observer: F)
    where
        F: FnMut(&GameSnapshot) + 'static,
    {
        match self.inner.observers.try_borrow_mut() {
            Ok(mut observers) => observers.push(Box::new(observer)),
            Err(_) => self.inner.pending.borrow_mut().push(Box::new(observer)),
        }
    }

    /// Request a move
    ///
    /// Returns `Busy` without touching the game if another move is still in
    /// progress on this session.
    ///
    /// ```
    /// use tile2048_engine::Session;
    /// use tile2048_types::Direction;
    ///
    /// let session = Session::with_seed(7);
    /// assert!(session.apply_move(Direction::Down).accepted());
    /// assert!(!session.is_busy());
    /// ```
    pub fn apply_move(&self, direction: Direction) -> MoveOutcome {
        let Some(_guard) = BusyGuard::acquire(&self.inner.busy) else {
            debug!("move {} dropped: session busy", direction.as_str());
            return MoveOutcome::Busy;
        };

        let (outcome, snapshot) = {
            let mut state = self.inner.state.borrow_mut();
            let outcome = state.apply_move(direction);
            (outcome, state.snapshot())
        };

        if outcome.accepted() {
            self.notify(&snapshot);
        }
        outcome
    }

    /// Start a new episode and notify observers
    pub fn reset(&self) {
        let snapshot = {
            let mut state = self.inner.state.borrow_mut();
            state.reset();
            state.snapshot()
        };
        self.notify(&snapshot);
    }

    fn notify(&self, snapshot: &GameSnapshot) {
        let Ok(mut observers) = self.inner.observers.try_borrow_mut() else {
            debug!("nested notification skipped (episode {})", snapshot.episode_id);
            return;
        };
        observers.extend(self.inner.pending.borrow_mut().drain(..));
        for observer in observers.iter_mut() {
            observer(snapshot);
        }
    }

    pub fn is_busy(&self) -> bool {
        self.inner.busy.get()
    }

    /// Row-major copy of the 16 cells
    pub fn board(&self) -> [Tile; CELL_COUNT] {
        self.inner.state.borrow().cells()
    }

    pub fn score(&self) -> u32 {
        self.inner.state.borrow().score()
    }

    pub fn status(&self) -> GameStatus {
        self.inner.state.borrow().status()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.inner.state.borrow().snapshot()
    }

    pub fn take_last_event(&self) -> Option<MoveEvent> {
        self.inner.state.borrow_mut().take_last_event()
    }

    /// Copy of the current board, for look-ahead without touching the game
    pub fn board_copy(&self) -> Board {
        *self.inner.state.borrow().board()
    }

    /// Run `f` against the game state (read-only)
    pub fn with_state<R>(&self, f: impl FnOnce(&GameState) -> R) -> R {
        f(&self.inner.state.borrow())
    }
}
