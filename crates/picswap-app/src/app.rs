use std::{
    cell::Cell,
    io::{self, BufRead, Write},
    rc::Rc,
    time::Duration,
};

use image::DynamicImage;
use picswap_game::{Puzzle, PuzzleSession};
use picswap_generator::PuzzleSeed;
use picswap_image::ImageDescriptor;

use crate::{
    async_work::{self, WorkError, WorkRequest, WorkResponse},
    command::{Command, HELP},
    export, render,
    settings::Settings,
};

/// How often a pending image load is polled.
const LOAD_TICK: Duration = Duration::from_millis(250);

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum AppError {
    #[display("terminal I/O failed: {_0}")]
    Io(#[from] io::Error),
    #[display("{_0}")]
    Work(#[from] WorkError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// The terminal game: one puzzle session driven by line commands.
pub struct PicswapApp {
    settings: Settings,
    session: PuzzleSession<DynamicImage>,
    board_changed: Rc<Cell<bool>>,
    pending_seed: Option<PuzzleSeed>,
}

impl PicswapApp {
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        let mut session = PuzzleSession::new();
        let board_changed = Rc::new(Cell::new(false));
        let flag = Rc::clone(&board_changed);
        session.subscribe(move |event| {
            log::debug!("puzzle event: {event:?}");
            flag.set(true);
        });
        let pending_seed = settings.seed;
        Self {
            settings,
            session,
            board_changed,
            pending_seed,
        }
    }

    #[must_use]
    pub fn session(&self) -> &PuzzleSession<DynamicImage> {
        &self.session
    }

    /// Loads the first puzzle, then reads commands from `input` until `quit`
    /// or end of input.
    pub fn run<R, W>(&mut self, input: R, mut out: W) -> Result<(), AppError>
    where
        R: BufRead,
        W: Write,
    {
        async_work::warm_up()?;
        writeln!(out, "picswap: put the picture back together. Type `help` for commands.")?;
        self.new_puzzle(&mut out)?;

        let mut lines = input.lines();
        loop {
            self.show_board_if_changed(&mut out)?;
            write!(out, "> ")?;
            out.flush()?;

            let Some(line) = lines.next() else {
                writeln!(out)?;
                break;
            };
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match line.parse::<Command>() {
                Ok(command) => {
                    if self.execute(command, &mut out)? == Flow::Quit {
                        break;
                    }
                }
                Err(err) => writeln!(out, "{err}")?,
            }
        }
        log::info!("leaving picswap");
        Ok(())
    }

    fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> Result<Flow, AppError> {
        match command {
            Command::Swap(first, second) => match self.session.swap(first, second) {
                Ok(operation) => {
                    if operation.newly_fixed > 0 {
                        writeln!(out, "{} more tile(s) home", operation.newly_fixed)?;
                    }
                    if operation.completes_puzzle {
                        let moves = self.session.puzzle().map_or(0, Puzzle::moves);
                        writeln!(
                            out,
                            "Solved in {moves} move(s)! Type `new` for another puzzle."
                        )?;
                    }
                }
                Err(reason) => writeln!(out, "{reason}")?,
            },
            Command::Show => {
                self.board_changed.set(false);
                self.show_board(out)?;
            }
            Command::Check(position) => match self.session.is_at_correct_position(position) {
                Ok(true) => writeln!(out, "tile at {position} is home")?,
                Ok(false) => writeln!(out, "tile at {position} is not home yet")?,
                Err(err) => writeln!(out, "{err}")?,
            },
            Command::New => self.new_puzzle(out)?,
            Command::Seed => match self.session.puzzle().and_then(Puzzle::seed) {
                Some(seed) => writeln!(out, "seed: {seed}")?,
                None => writeln!(out, "this puzzle has no seed")?,
            },
            Command::Export => self.export(out)?,
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn new_puzzle<W: Write>(&mut self, out: &mut W) -> Result<(), AppError> {
        let descriptor = self.settings.image.clone();
        write!(out, "loading {descriptor}")?;
        out.flush()?;

        let handle = async_work::enqueue(WorkRequest::LoadImage {
            descriptor: descriptor.clone(),
            offline: self.settings.offline,
            timeout: self.settings.timeout,
        })?;
        let WorkResponse::ImageReady(loaded) = handle.wait(LOAD_TICK, || {
            let _ = write!(out, ".");
            let _ = out.flush();
        })?;
        writeln!(out)?;

        if loaded.origin.is_fallback() && descriptor != ImageDescriptor::Default {
            writeln!(out, "could not load {descriptor}, using the default image")?;
        }

        let grid = self.settings.grid;
        match self.pending_seed.take() {
            Some(seed) => self.session.initialize_with_seed(&loaded, grid, seed),
            None => self.session.initialize(&loaded, grid),
        }

        if let Some(puzzle) = self.session.puzzle() {
            writeln!(
                out,
                "new {grid} puzzle, {} of {} tiles already home",
                puzzle.fixed_count(),
                puzzle.tile_count()
            )?;
        }
        if self.session.is_complete() {
            writeln!(out, "Already solved! Type `new` for another puzzle.")?;
        }
        if self.settings.export_dir.is_some() {
            self.export(out)?;
        }
        Ok(())
    }

    fn export<W: Write>(&self, out: &mut W) -> Result<(), AppError> {
        let Some(dir) = &self.settings.export_dir else {
            writeln!(out, "no export directory, start with --export-dir DIR")?;
            return Ok(());
        };
        let Some(puzzle) = self.session.puzzle() else {
            return Ok(());
        };
        match export::export_puzzle(puzzle, dir) {
            Ok(files) => writeln!(out, "wrote {files} file(s) to {}", dir.display())?,
            Err(err) => {
                log::warn!("export failed: {err}");
                writeln!(out, "export failed: {err}")?;
            }
        }
        Ok(())
    }

    fn show_board_if_changed<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if self.board_changed.replace(false) {
            self.show_board(out)?;
        }
        Ok(())
    }

    fn show_board<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match self.session.puzzle() {
            Some(puzzle) => {
                write!(out, "{}", render::render_board(puzzle))?;
                writeln!(out, "{}", render::render_status(puzzle))
            }
            None => writeln!(out, "no puzzle yet"),
        }
    }
}
