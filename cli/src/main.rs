use clap::{arg, command, ArgAction, Parser, Subcommand};
use crossterm::{
    cursor::{MoveLeft, MoveRight, MoveUp},
    execute,
    style::{Attribute, Color as TermColor, SetBackgroundColor, Stylize},
};
use cross_solver::constants::{ALL_COLORS, DEFAULT_TABLE_DIR, DEFAULT_TOP_K_DEPTH};
use cross_solver::scramble::{gen_scramble, scramble_from_str, scramble_to_str};
use cross_solver::solver::{CrossSolution, CrossSolver};
use cross_solver::{cubie::CubieCube, error::Error, facelet::Color, facelet::FaceCube};
use log::LevelFilter;
use spinners::Spinner;
use std::{
    io::{self, stdout},
    path::PathBuf,
    time::Instant,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Directory of the cached distance tables
    #[arg(long, global = true, default_value = DEFAULT_TABLE_DIR)]
    tables: PathBuf,

    /// Build the tables in memory and never read or write the cache
    #[arg(long, global = true)]
    no_cache: bool,

    /// Increase logging verbosity (can be repeated)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "finds the shortest crosses of a cube state")]
    #[clap(group(
    clap::ArgGroup::new("state")
        .required(true)
        .args(&["scramble", "facelet"]),
    ))]
    Solve {
        #[arg(short, long)]
        scramble: Option<String>,

        #[arg(short, long)]
        facelet: Option<String>,

        /// Only solve the cross of this face
        #[arg(long, value_parser = parse_face, conflicts_with = "exclude")]
        face: Option<Color>,

        /// Give up on crosses longer than this
        #[arg(short, long)]
        max: Option<usize>,

        /// List the crosses of up to this many faces instead of the best ones
        #[arg(short, long)]
        top: Option<usize>,

        /// Leave out the crosses of these faces
        #[arg(short, long, value_delimiter = ',', value_parser = parse_face)]
        exclude: Vec<Color>,

        #[arg(short, long)]
        preview: bool,
    },
    #[command(about = "generates scramble")]
    Scramble {
        #[arg(short, long, default_value_t = 20)]
        length: usize,
        #[arg(short, long)]
        preview: bool,
    },
    #[command(about = "builds or loads all distance tables and prints their depth counts")]
    Tables,
}

fn parse_face(s: &str) -> Result<Color, String> {
    s.parse().map_err(|e: Error| e.to_string())
}

struct SolveArgs<'a> {
    face: Option<Color>,
    max: Option<usize>,
    top: Option<usize>,
    exclude: &'a [Color],
}

fn solve(
    solver: &CrossSolver,
    scramble: &Option<String>,
    facelet: &Option<String>,
    args: SolveArgs,
    preview: bool,
) -> Result<(), Error> {
    let state = if let Some(scramble) = scramble {
        CubieCube::from(&scramble_from_str(scramble)?)
    } else if let Some(facelet) = facelet {
        CubieCube::try_from(&FaceCube::try_from(facelet.as_str())?)?
    } else {
        return Ok(());
    };
    if preview {
        print_facelet(&FaceCube::try_from(&state)?)?;
    }
    solve_state(solver, &state, args)
}

fn solve_state(solver: &CrossSolver, state: &CubieCube, args: SolveArgs) -> Result<(), Error> {
    let faces: Vec<Color> = match args.face {
        Some(face) => vec![face],
        None => ALL_COLORS
            .into_iter()
            .filter(|f| !args.exclude.contains(f))
            .collect(),
    };

    let start = Instant::now();
    let mut spinner = Spinner::new(spinners::Spinners::Dots, "Solving".to_owned());
    let result = match args.top {
        Some(k) => solver
            .top_k_cross_solutions(state, args.max, k, &faces)
            .map(|s| (None, s)),
        None => solver
            .best_cross_solutions(state, args.max, &faces)
            .map(|b| (Some(b.solve_time), b.solutions)),
    };
    let end = Instant::now();
    spinner.stop_with_newline();
    let (solve_time, solutions) = result?;

    if solutions.is_empty() {
        match (args.max, args.top) {
            (Some(max), _) => println!("No cross within {} moves", max),
            (None, Some(_)) => println!("No cross within {} moves", DEFAULT_TOP_K_DEPTH),
            (None, None) => println!("No face to solve"),
        }
    }
    for solution in &solutions {
        print_solution(solution)?;
    }
    if let Some(solve_time) = solve_time {
        println!("Solve time: {:?}", solve_time);
    }
    println!("Total time: {:?}", end - start);

    Ok(())
}

fn print_solution(solution: &CrossSolution) -> Result<(), Error> {
    let styled = format!("{} cross", solution.face).with(color_to_termcolor(solution.face));
    println!(
        "{styled} ({} moves): {}",
        solution.length,
        scramble_to_str(&solution.solution)?
    );
    Ok(())
}

fn tables(solver: &CrossSolver) -> Result<(), Error> {
    match solver.cache() {
        Some(cache) => println!("Tables in {}", cache.dir().display()),
        None => println!("Tables in memory"),
    }
    for face in ALL_COLORS {
        let start = Instant::now();
        let table = solver.table(face)?;
        println!(
            "{} cross: max depth {}, {:?}",
            face,
            table.max_depth(),
            start.elapsed()
        );
        for (depth, count) in table.depth_counts().iter().enumerate() {
            println!("  {:>2}: {:>6}", depth, count);
        }
    }
    Ok(())
}

fn color_to_termcolor(color: Color) -> TermColor {
    match color {
        Color::U => TermColor::DarkYellow,
        Color::R => TermColor::Magenta,
        Color::F => TermColor::Green,
        Color::D => TermColor::White,
        Color::L => TermColor::Red,
        Color::B => TermColor::Blue,
    }
}

fn print_face(face: &[Color], offset: u16) -> Result<(), io::Error> {
    for i in 0..3 {
        let layer = format!(
            "{}  {}  {}  {}",
            SetBackgroundColor(color_to_termcolor(face[3 * i])),
            SetBackgroundColor(color_to_termcolor(face[(3 * i) + 1])),
            SetBackgroundColor(color_to_termcolor(face[(3 * i) + 2])),
            SetBackgroundColor(TermColor::Reset)
        );

        println!("{layer}");

        if offset != 0 {
            execute!(stdout(), MoveRight(offset))?;
        }
    }

    Ok(())
}

fn print_facelet(facelet: &FaceCube) -> Result<(), io::Error> {
    let stdout = stdout();

    println!();
    execute!(&stdout, MoveRight(6))?;
    print_face(&facelet.f[0..9], 6)?; // U
    execute!(&stdout, MoveLeft(6))?;
    print_face(&facelet.f[36..45], 0)?; // L
    execute!(&stdout, MoveRight(6), MoveUp(3))?;
    print_face(&facelet.f[18..27], 6)?; // F
    execute!(&stdout, MoveLeft(12), MoveUp(3), MoveRight(12))?;
    print_face(&facelet.f[9..18], 12)?; // R
    execute!(&stdout, MoveLeft(12), MoveUp(3), MoveRight(18))?;
    print_face(&facelet.f[45..54], 18)?; // B
    execute!(&stdout, MoveLeft(12))?;
    print_face(&facelet.f[27..36], 6)?; // D
    execute!(&stdout, MoveLeft(12))?;
    println!();

    Ok(())
}

fn scramble(length: usize, preview: bool) -> Result<(), Error> {
    let ss = gen_scramble(length);
    let cc = CubieCube::from(&ss);
    println!("Scramble: {}", scramble_to_str(&ss)?);
    if preview {
        print_facelet(&FaceCube::try_from(&cc)?)?;
    }
    Ok(())
}

fn main() {
    let program = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match program.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .init();

    let solver = if program.no_cache {
        CrossSolver::in_memory()
    } else {
        CrossSolver::new(program.tables.clone())
    };

    let result = match &program.command {
        Some(Commands::Solve {
            scramble,
            facelet,
            face,
            max,
            top,
            exclude,
            preview,
        }) => solve(
            &solver,
            scramble,
            facelet,
            SolveArgs {
                face: *face,
                max: *max,
                top: *top,
                exclude,
            },
            *preview,
        ),
        Some(Commands::Scramble { length, preview }) => scramble(*length, *preview),
        Some(Commands::Tables) => tables(&solver),
        _ => Ok(()),
    };

    if let Err(error) = result {
        let styled = "Error:".with(TermColor::Red).attribute(Attribute::Bold);
        println!("{styled} {error}");
    }
}
