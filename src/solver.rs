use std::path::PathBuf;
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};

use log::{debug, warn};
use serde::Serialize;

use crate::cache::TableCache;
use crate::constants::*;
use crate::coord::{CrossCoord, CrossState};
use crate::cubie::EdgeCubies;
use crate::error::Error;
use crate::facelet::Color;
use crate::moves::{Move, MoveEffects};
use crate::pruning::DistanceTable;

/// One optimal cross solution.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct CrossSolution {
    pub face: Color,
    pub length: usize,
    pub solution: Vec<Move>,
}

impl CrossSolution {
    fn new(face: Color, solution: Vec<Move>) -> Self {
        Self {
            face,
            length: solution.len(),
            solution,
        }
    }
}

/// The shortest crosses over a set of faces.
///
/// * length: the shortest cross length, `None` if no face could be solved within the bound.
/// * solutions: one solution for every face tied at that length, in U, R, F, D, L, B order.
/// * solve_time: time to get the solutions (not including table creation).
#[derive(Debug, Serialize, Clone)]
pub struct BestSolutions {
    pub length: Option<usize>,
    pub solutions: Vec<CrossSolution>,
    pub solve_time: Duration,
}

/// The cross search engine.
///
/// Owns the state encoder, the move effects and one distance table per face. A face's table is
/// loaded from the cache or built on first use and shared read-only afterwards, so a `CrossSolver`
/// can serve many threads at once.
pub struct CrossSolver {
    coord: CrossCoord,
    effects: MoveEffects,
    tables: [OnceLock<Arc<DistanceTable>>; N_FACE],
    cache: Option<TableCache>,
}

impl CrossSolver {
    /// A solver caching its tables in `dir`.
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        let effects = MoveEffects::new();
        let cache = TableCache::new(dir, effects.tokens());
        Self::with_parts(effects, Some(cache))
    }

    /// A solver that builds its tables in memory and never touches the disk.
    pub fn in_memory() -> Self {
        Self::with_parts(MoveEffects::new(), None)
    }

    /// A solver caching its tables in the directory named by `CROSS_SOLVER_TABLES`, or in
    /// `tables` if the variable is unset.
    pub fn from_env() -> Self {
        let dir = std::env::var_os(TABLE_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TABLE_DIR));
        Self::new(dir)
    }

    fn with_parts(effects: MoveEffects, cache: Option<TableCache>) -> Self {
        Self {
            coord: CrossCoord::new(),
            effects,
            tables: Default::default(),
            cache,
        }
    }

    pub fn cache(&self) -> Option<&TableCache> {
        self.cache.as_ref()
    }

    /// The distance table of `face`, loading or building it on first use.
    ///
    /// Threads racing on the same face may each build the table; the first one published is
    /// returned to all of them. A table that cannot be written to the cache is still used.
    pub fn table(&self, face: Color) -> Result<Arc<DistanceTable>, Error> {
        let slot = &self.tables[face as usize];
        if let Some(table) = slot.get() {
            return Ok(Arc::clone(table));
        }
        let cached = self
            .cache
            .as_ref()
            .and_then(|c| c.load(face, &self.coord, &self.effects));
        let table = match cached {
            Some(table) => table,
            None => {
                let table = DistanceTable::build(face, &self.coord, &self.effects)?;
                if let Some(cache) = &self.cache {
                    if let Err(err) = cache.store(&table) {
                        warn!("Could not cache table for face {}: {}", face, err);
                    }
                }
                table
            }
        };
        Ok(Arc::clone(slot.get_or_init(|| Arc::new(table))))
    }

    /// Number of moves needed to solve the cross of `face`.
    pub fn distance<C: EdgeCubies + ?Sized>(&self, cube: &C, face: Color) -> Result<usize, Error> {
        let table = self.table(face)?;
        let state = CrossState::from_cube(cube, face)?;
        self.lookup(&table, &state)
    }

    fn lookup(&self, table: &DistanceTable, state: &CrossState) -> Result<usize, Error> {
        let ix = self.coord.encode(state)?;
        table.distance(ix).ok_or_else(|| Error::IncompleteTable {
            face: table.face(),
            visited: table.as_slice().iter().filter(|&&d| d >= 0).count(),
            total: N_CROSS_STATES,
        })
    }

    /// Find a shortest move sequence solving the cross of `face`.
    ///
    /// Returns `Ok(None)` if the cross needs more than `max_depth` moves. Among several shortest
    /// sequences the one taking the earliest move in canonical order at every step is returned.
    pub fn solve_cross<C: EdgeCubies + ?Sized>(
        &self,
        cube: &C,
        face: Color,
        max_depth: Option<usize>,
    ) -> Result<Option<Vec<Move>>, Error> {
        let table = self.table(face)?;
        let state = CrossState::from_cube(cube, face)?;
        if state.is_solved(face) {
            return Ok(Some(Vec::new()));
        }
        let depth = self.lookup(&table, &state)?;
        if max_depth.is_some_and(|max| depth > max) {
            debug!("Cross {} needs {} moves, more than {:?}", face, depth, max_depth);
            return Ok(None);
        }
        self.descend(&table, state, depth).map(Some)
    }

    /// Walk down the distance table from `state` at distance `depth` to the solved cross.
    fn descend(
        &self,
        table: &DistanceTable,
        mut state: CrossState,
        mut depth: usize,
    ) -> Result<Vec<Move>, Error> {
        let mut solution = Vec::with_capacity(depth);
        while depth > 0 {
            let mut next = None;
            for (m, effect) in self.effects.iter() {
                let state1 = state.apply(effect);
                if self.lookup(table, &state1)? + 1 == depth {
                    next = Some((m, state1));
                    break;
                }
            }
            // a state at distance d > 0 always has a neighbour at distance d - 1
            let (m, state1) = next.ok_or_else(|| Error::IncompleteTable {
                face: table.face(),
                visited: table.as_slice().iter().filter(|&&d| d >= 0).count(),
                total: N_CROSS_STATES,
            })?;
            solution.push(m);
            state = state1;
            depth -= 1;
        }
        Ok(solution)
    }

    /// Solve the cross of every face in `faces` and keep the shortest ones.
    ///
    /// All faces tied at the shortest length are returned, not just the first.
    pub fn best_cross_solutions<C: EdgeCubies + ?Sized>(
        &self,
        cube: &C,
        max_depth: Option<usize>,
        faces: &[Color],
    ) -> Result<BestSolutions, Error> {
        for face in faces {
            self.table(*face)?;
        }
        let start_time = Instant::now();
        let mut length = None;
        let mut solutions = Vec::new();
        for face in ALL_COLORS.into_iter().filter(|f| faces.contains(f)) {
            let Some(solution) = self.solve_cross(cube, face, max_depth)? else {
                continue;
            };
            match length {
                Some(best) if solution.len() > best => continue,
                Some(best) if solution.len() == best => {}
                _ => {
                    length = Some(solution.len());
                    solutions.clear();
                }
            }
            solutions.push(CrossSolution::new(face, solution));
        }
        Ok(BestSolutions {
            length,
            solutions,
            solve_time: start_time.elapsed(),
        })
    }

    /// Up to `k` cross solutions over `faces`, at most one per face, sorted by length and then by
    /// face.
    ///
    /// Faces whose cross needs more than `max_depth` moves (default [DEFAULT_TOP_K_DEPTH]) are
    /// left out.
    pub fn top_k_cross_solutions<C: EdgeCubies + ?Sized>(
        &self,
        cube: &C,
        max_depth: Option<usize>,
        k: usize,
        faces: &[Color],
    ) -> Result<Vec<CrossSolution>, Error> {
        let bound = max_depth.unwrap_or(DEFAULT_TOP_K_DEPTH);
        let mut solutions = Vec::new();
        for face in ALL_COLORS.into_iter().filter(|f| faces.contains(f)) {
            // the table gives the shortest length directly, no need to deepen the bound step by step
            if let Some(solution) = self.solve_cross(cube, face, Some(bound))? {
                solutions.push(CrossSolution::new(face, solution));
            }
        }
        solutions.sort_by_key(|s| (s.length, s.face));
        solutions.truncate(k);
        Ok(solutions)
    }
}

lazy_static! {
    static ref SOLVER: CrossSolver = CrossSolver::from_env();
}

/// Solve the cross of `face` with the shared solver.
///
/// # Examples
/// ```rust,no_run
/// use cross_solver::cubie::CubieCube;
/// use cross_solver::facelet::Color;
/// use cross_solver::scramble::scramble_from_str;
/// use cross_solver::solver::solve_cross;
///
/// let scramble = scramble_from_str("R U").unwrap();
/// let cube = CubieCube::from(&scramble);
/// let solution = solve_cross(&cube, Color::U, Some(2)).unwrap().unwrap();
/// assert_eq!(solution.len(), 2);
/// ```
pub fn solve_cross<C: EdgeCubies + ?Sized>(
    cube: &C,
    face: Color,
    max_depth: Option<usize>,
) -> Result<Option<Vec<Move>>, Error> {
    SOLVER.solve_cross(cube, face, max_depth)
}

/// Shortest crosses over `faces` with the shared solver.
pub fn best_cross_solutions<C: EdgeCubies + ?Sized>(
    cube: &C,
    max_depth: Option<usize>,
    faces: &[Color],
) -> Result<BestSolutions, Error> {
    SOLVER.best_cross_solutions(cube, max_depth, faces)
}

/// Up to `k` cross solutions over `faces` with the shared solver.
pub fn top_k_cross_solutions<C: EdgeCubies + ?Sized>(
    cube: &C,
    max_depth: Option<usize>,
    k: usize,
    faces: &[Color],
) -> Result<Vec<CrossSolution>, Error> {
    SOLVER.top_k_cross_solutions(cube, max_depth, k, faces)
}

#[cfg(test)]
mod test {
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use tempfile::tempdir;

    use crate::cubie::CubieCube;
    use crate::moves::Move::*;
    use crate::scramble::{scramble_from_str, scramble_to_str};
    use crate::solver::*;

    lazy_static! {
        static ref SOLVER: CrossSolver = CrossSolver::in_memory();
    }

    fn cube(scramble: &str) -> CubieCube {
        CubieCube::from(&scramble_from_str(scramble).unwrap())
    }

    fn random_cube(rng: &mut StdRng, length: usize) -> CubieCube {
        let moves: Vec<Move> = (0..length)
            .map(|_| ALL_MOVES[rng.gen_range(0..N_MOVE)])
            .collect();
        CubieCube::from(&moves)
    }

    #[test]
    fn test_solved_cross_is_empty() {
        let cc = CubieCube::default();
        for face in ALL_COLORS {
            assert_eq!(SOLVER.solve_cross(&cc, face, Some(0)).unwrap(), Some(vec![]));
        }
        // D turns leave the U cross alone
        let cc = cube("D2 D'");
        assert!(cc.is_cross_solved(Color::U));
        assert_eq!(SOLVER.solve_cross(&cc, Color::U, None).unwrap(), Some(vec![]));
    }

    #[test]
    fn test_single_move() {
        let cc = cube("F");
        assert_eq!(
            SOLVER.solve_cross(&cc, Color::U, Some(1)).unwrap(),
            Some(vec![F3])
        );
    }

    #[test]
    fn test_two_moves() {
        let cc = cube("R U");
        let solution = SOLVER.solve_cross(&cc, Color::U, Some(2)).unwrap().unwrap();
        assert_eq!(scramble_to_str(&solution).unwrap(), "U' R'");
        assert_eq!(SOLVER.solve_cross(&cc, Color::U, Some(1)).unwrap(), None);
        assert_eq!(SOLVER.distance(&cc, Color::U).unwrap(), 2);
    }

    #[test]
    fn test_solutions_solve_the_cross() {
        let mut rng = StdRng::seed_from_u64(2024);
        for _ in 0..20 {
            let cc = random_cube(&mut rng, 25);
            for face in ALL_COLORS {
                let solution = SOLVER.solve_cross(&cc, face, None).unwrap().unwrap();
                assert!(solution.len() <= 8);
                assert_eq!(solution.len(), SOLVER.distance(&cc, face).unwrap());
                assert!(cc.apply_moves(&solution).is_cross_solved(face));
            }
        }
    }

    #[test]
    fn test_descent_is_monotonic() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10 {
            let mut cc = random_cube(&mut rng, 20);
            let solution = SOLVER.solve_cross(&cc, Color::F, None).unwrap().unwrap();
            let mut depth = SOLVER.distance(&cc, Color::F).unwrap();
            for m in solution {
                cc.apply_move(m);
                let depth1 = SOLVER.distance(&cc, Color::F).unwrap();
                assert_eq!(depth1 + 1, depth);
                depth = depth1;
            }
            assert_eq!(depth, 0);
        }
    }

    #[test]
    fn test_solutions_are_deterministic() {
        let cc = cube("R U R' U' F2 D L' B");
        let first = SOLVER.solve_cross(&cc, Color::D, None).unwrap();
        let again = CrossSolver::in_memory()
            .solve_cross(&cc, Color::D, None)
            .unwrap();
        assert_eq!(first, again);
    }

    #[test]
    fn test_broken_cube_is_an_error() {
        let mut cc = CubieCube::default();
        cc.ep[1] = cc.ep[0];
        assert!(matches!(
            SOLVER.solve_cross(&cc, Color::U, None),
            Err(Error::InvalidCubieValue)
        ));
        // the R cross does not involve UF, so it can still be read
        assert!(SOLVER.solve_cross(&cc, Color::R, None).is_ok());
    }

    #[test]
    fn test_best_cross_solutions() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..10 {
            let cc = random_cube(&mut rng, 25);
            let best = SOLVER.best_cross_solutions(&cc, None, &ALL_COLORS).unwrap();
            let lengths: Vec<usize> = ALL_COLORS
                .iter()
                .map(|&f| SOLVER.distance(&cc, f).unwrap())
                .collect();
            let min = *lengths.iter().min().unwrap();
            assert_eq!(best.length, Some(min));
            let tied: Vec<Color> = ALL_COLORS
                .iter()
                .zip(&lengths)
                .filter(|(_, &l)| l == min)
                .map(|(&f, _)| f)
                .collect();
            let faces: Vec<Color> = best.solutions.iter().map(|s| s.face).collect();
            assert_eq!(faces, tied);
            assert!(best.solutions.iter().all(|s| s.length == min));
        }
    }

    #[test]
    fn test_best_with_face_subset_and_bound() {
        let cc = cube("F");
        // F moves UF, DF, FR and FL, so only the B cross survives
        let best = SOLVER
            .best_cross_solutions(&cc, None, &[Color::U, Color::F, Color::B])
            .unwrap();
        assert_eq!(best.length, Some(0));
        let faces: Vec<Color> = best.solutions.iter().map(|s| s.face).collect();
        assert_eq!(faces, vec![Color::B]);
        assert!(best.solutions[0].solution.is_empty());

        let best = SOLVER
            .best_cross_solutions(&cc, None, &[Color::U, Color::F])
            .unwrap();
        assert_eq!(best.length, Some(1));
        assert_eq!(best.solutions.len(), 2);
        assert!(best.solutions.iter().all(|s| s.solution == vec![F3]));

        let best = SOLVER
            .best_cross_solutions(&cc, Some(0), &[Color::U, Color::R])
            .unwrap();
        assert_eq!(best.length, None);
        assert!(best.solutions.is_empty());

        let best = SOLVER.best_cross_solutions(&cc, None, &[]).unwrap();
        assert_eq!(best.length, None);
    }

    #[test]
    fn test_top_k_cross_solutions() {
        let cc = cube("R U");
        let top = SOLVER.top_k_cross_solutions(&cc, None, 10, &ALL_COLORS).unwrap();
        assert_eq!(top.len(), 6);
        for pair in top.windows(2) {
            assert!((pair[0].length, pair[0].face) <= (pair[1].length, pair[1].face));
        }
        // R U only disturbs one edge of the D cross (by R) and one of the L cross (by U)
        let faces: Vec<Color> = top.iter().map(|s| s.face).collect();
        assert_eq!(
            faces,
            vec![Color::D, Color::L, Color::U, Color::R, Color::F, Color::B]
        );
        assert_eq!(top[0].solution, vec![R3]);
        assert_eq!(top[1].solution, vec![U3]);
        assert!(top[2..].iter().all(|s| s.length == 2));

        let best = SOLVER.best_cross_solutions(&cc, None, &ALL_COLORS).unwrap();
        assert_eq!(best.solutions[..], top[..2]);

        let top3 = SOLVER.top_k_cross_solutions(&cc, None, 3, &ALL_COLORS).unwrap();
        assert_eq!(top3[..], top[..3]);
        assert!(SOLVER
            .top_k_cross_solutions(&cc, None, 0, &ALL_COLORS)
            .unwrap()
            .is_empty());

        let bounded = SOLVER.top_k_cross_solutions(&cc, Some(1), 10, &ALL_COLORS).unwrap();
        assert_eq!(bounded[..], top[..2]);

        let without_u = SOLVER
            .top_k_cross_solutions(&cc, None, 10, &[Color::R, Color::F, Color::D, Color::L, Color::B])
            .unwrap();
        assert!(without_u.iter().all(|s| s.face != Color::U));
        assert_eq!(without_u.len(), 5);
    }

    #[test]
    fn test_tables_are_cached() {
        let dir = tempdir().unwrap();
        let solver = CrossSolver::new(dir.path());
        let cc = cube("R U");
        let solution = solver.solve_cross(&cc, Color::U, None).unwrap();
        let cache = solver.cache().unwrap();
        assert!(cache.path(Color::U).exists());
        assert!(!cache.path(Color::R).exists());

        let reloaded = CrossSolver::new(dir.path());
        assert_eq!(reloaded.solve_cross(&cc, Color::U, None).unwrap(), solution);
        assert_eq!(*reloaded.table(Color::U).unwrap(), *solver.table(Color::U).unwrap());
    }

    #[test]
    fn test_corrupt_cache_is_rebuilt() {
        let dir = tempdir().unwrap();
        let solver = CrossSolver::new(dir.path());
        let path = solver.cache().unwrap().path(Color::R);
        std::fs::write(&path, b"garbage").unwrap();
        let cc = cube("R U");
        assert_eq!(
            solver.solve_cross(&cc, Color::R, None).unwrap().map(|s| s.len()),
            Some(SOLVER.distance(&cc, Color::R).unwrap())
        );
        // the rebuilt table replaced the garbage
        assert!(solver
            .cache()
            .unwrap()
            .read(Color::R, &SOLVER.coord, &SOLVER.effects)
            .is_ok());
    }

    #[test]
    fn test_concurrent_readers() {
        let cc = cube("R U F' L2");
        let expected = SOLVER.solve_cross(&cc, Color::B, None).unwrap();
        let solver = CrossSolver::in_memory();
        std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| s.spawn(|| solver.solve_cross(&cc, Color::B, None).unwrap()))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }
}
