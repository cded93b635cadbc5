use std::fmt;

use picswap_core::{GridSize, TileSource};
use picswap_generator::PuzzleSeed;

use crate::{GameError, Puzzle, SwapBlockReason, SwapOperation};

/// A change to the session's puzzle, delivered to subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum PuzzleEvent {
    /// A new puzzle replaced the previous one.
    Started {
        /// Number of tiles in the new puzzle.
        tiles: usize,
        /// Number of tiles that landed on their solved position.
        fixed: usize,
    },
    /// Two tiles were swapped.
    Swapped(SwapOperation),
}

/// Handle returned by [`PuzzleSession::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&PuzzleEvent)>;

/// Owns the current puzzle and notifies subscribers when it changes.
///
/// A session starts empty. Each [`start`](Self::start) replaces the puzzle
/// wholesale; there is no in-place reset. Mutation takes `&mut self`, so a
/// session has a single writer; share it across threads only behind a lock.
///
/// Subscribers are called after a puzzle starts and after every accepted swap,
/// never for a refused one.
///
/// # Example
///
/// ```
/// use std::{cell::Cell, rc::Rc};
///
/// use picswap_core::{Extent, GridSize};
/// use picswap_game::PuzzleSession;
///
/// let mut session = PuzzleSession::new();
/// let events = Rc::new(Cell::new(0));
/// let counter = Rc::clone(&events);
/// session.subscribe(move |_event| counter.set(counter.get() + 1));
///
/// session.initialize(&Extent::new(9, 9), GridSize::DEFAULT);
/// assert_eq!(events.get(), 1);
///
/// // Refused swaps notify nobody.
/// assert!(session.swap(0, 0).is_err());
/// assert_eq!(events.get(), 1);
/// ```
pub struct PuzzleSession<T> {
    puzzle: Option<Puzzle<T>>,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
}

impl<T> Default for PuzzleSession<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for PuzzleSession<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PuzzleSession")
            .field("puzzle", &self.puzzle)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl<T> PuzzleSession<T> {
    /// Creates a session with no puzzle and no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            puzzle: None,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// Registers `listener` to be called after every state change.
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&PuzzleEvent) + 'static,
    {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a subscriber. Returns `false` if `id` was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Returns the current puzzle, if one has been started.
    #[must_use]
    pub fn puzzle(&self) -> Option<&Puzzle<T>> {
        self.puzzle.as_ref()
    }

    /// Replaces the current puzzle with `puzzle` and notifies subscribers.
    pub fn start(&mut self, puzzle: Puzzle<T>) {
        let event = PuzzleEvent::Started {
            tiles: puzzle.tile_count(),
            fixed: puzzle.fixed_count(),
        };
        self.puzzle = Some(puzzle);
        self.notify(&event);
    }

    /// Cuts `source` into `grid` tiles, shuffles them, and starts the result.
    pub fn initialize<S>(&mut self, source: &S, grid: GridSize)
    where
        S: TileSource<Region = T> + ?Sized,
    {
        self.start(Puzzle::new(source, grid));
    }

    /// Like [`initialize`](Self::initialize), with the shuffle determined by `seed`.
    pub fn initialize_with_seed<S>(&mut self, source: &S, grid: GridSize, seed: PuzzleSeed)
    where
        S: TileSource<Region = T> + ?Sized,
    {
        self.start(Puzzle::with_seed(source, grid, seed));
    }

    /// Swaps two tiles of the current puzzle and notifies subscribers.
    ///
    /// # Errors
    ///
    /// Returns [`SwapBlockReason::NotStarted`] if there is no puzzle, or any
    /// reason [`Puzzle::swap`] refuses the swap. Nothing changes and nobody is
    /// notified in that case.
    pub fn swap(&mut self, first: usize, second: usize) -> Result<SwapOperation, SwapBlockReason> {
        let puzzle = self.puzzle.as_mut().ok_or(SwapBlockReason::NotStarted)?;
        let operation = puzzle.swap(first, second)?;
        self.notify(&PuzzleEvent::Swapped(operation));
        Ok(operation)
    }

    /// Returns `true` if the tile at `position` is the one that belongs there.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NotStarted`] if there is no puzzle, or
    /// [`GameError::PositionOutOfRange`] if `position` is outside it.
    pub fn is_at_correct_position(&self, position: usize) -> Result<bool, GameError> {
        self.puzzle
            .as_ref()
            .ok_or(GameError::NotStarted)?
            .is_at_correct_position(position)
    }

    /// Returns `true` if a puzzle is running and every tile is fixed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.puzzle.as_ref().is_some_and(Puzzle::is_complete)
    }

    fn notify(&mut self, event: &PuzzleEvent) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use picswap_core::{Extent, TileRect};

    use super::*;

    fn recorder(session: &mut PuzzleSession<TileRect>) -> (ListenerId, Rc<RefCell<Vec<PuzzleEvent>>>) {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        let id = session.subscribe(move |event| sink.borrow_mut().push(*event));
        (id, events)
    }

    fn scrambled() -> Puzzle<TileRect> {
        Puzzle::from_arrangement(
            &Extent::new(9, 9),
            GridSize::DEFAULT,
            &[1, 0, 2, 3, 4, 5, 6, 8, 7],
        )
        .unwrap()
    }

    #[test]
    fn test_empty_session() {
        let mut session = PuzzleSession::<TileRect>::new();
        assert!(session.puzzle().is_none());
        assert!(!session.is_complete());
        assert_eq!(session.swap(0, 1), Err(SwapBlockReason::NotStarted));
        assert_eq!(session.is_at_correct_position(0), Err(GameError::NotStarted));
    }

    #[test]
    fn test_start_notifies() {
        let mut session = PuzzleSession::new();
        let (_, events) = recorder(&mut session);

        session.start(scrambled());
        assert_eq!(
            *events.borrow(),
            vec![PuzzleEvent::Started { tiles: 9, fixed: 5 }]
        );
    }

    #[test]
    fn test_swap_notifies_only_when_accepted() {
        let mut session = PuzzleSession::new();
        session.start(scrambled());
        let (_, events) = recorder(&mut session);

        assert!(session.swap(2, 3).is_err());
        assert!(session.swap(0, 0).is_err());
        assert!(session.swap(0, 99).is_err());
        assert!(events.borrow().is_empty());

        let operation = session.swap(0, 1).unwrap();
        assert_eq!(*events.borrow(), vec![PuzzleEvent::Swapped(operation)]);
    }

    #[test]
    fn test_multiple_subscribers_and_unsubscribe() {
        let mut session = PuzzleSession::new();
        let (first, first_events) = recorder(&mut session);
        let (_, second_events) = recorder(&mut session);

        session.start(scrambled());
        assert_eq!(first_events.borrow().len(), 1);
        assert_eq!(second_events.borrow().len(), 1);

        assert!(session.unsubscribe(first));
        assert!(!session.unsubscribe(first));

        session.swap(0, 1).unwrap();
        assert_eq!(first_events.borrow().len(), 1);
        assert_eq!(second_events.borrow().len(), 2);
    }

    #[test]
    fn test_start_replaces_previous_puzzle() {
        let mut session = PuzzleSession::new();
        session.start(scrambled());
        session.swap(0, 1).unwrap();
        let old_ids: Vec<_> = session.puzzle().unwrap().solved_order().to_vec();

        session.initialize(&Extent::new(12, 12), GridSize::try_new(2, 2).unwrap());
        let puzzle = session.puzzle().unwrap();
        assert_eq!(puzzle.tile_count(), 4);
        assert_eq!(puzzle.moves(), 0);
        assert!(puzzle.solved_order().iter().all(|id| !old_ids.contains(id)));
    }

    #[test]
    fn test_completion_through_session() {
        let mut session = PuzzleSession::new();
        session.start(scrambled());
        let (_, events) = recorder(&mut session);

        session.swap(0, 1).unwrap();
        assert!(!session.is_complete());
        let last = session.swap(7, 8).unwrap();
        assert!(last.completes_puzzle);
        assert!(session.is_complete());
        assert_eq!(session.is_at_correct_position(8), Ok(true));

        let events = events.borrow();
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(PuzzleEvent::is_swapped));
    }

    #[test]
    fn test_seeded_initialize_is_reproducible() {
        let seed: PuzzleSeed = "1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef"
            .parse()
            .unwrap();
        let mut a = PuzzleSession::new();
        let mut b = PuzzleSession::new();
        a.initialize_with_seed(&Extent::new(40, 40), GridSize::try_new(4, 4).unwrap(), seed);
        b.initialize_with_seed(&Extent::new(40, 40), GridSize::try_new(4, 4).unwrap(), seed);
        assert_eq!(
            a.puzzle().unwrap().arrangement(),
            b.puzzle().unwrap().arrangement()
        );
    }
}
