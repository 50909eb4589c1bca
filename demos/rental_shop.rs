//! Rental shop demo
//! A line-command front end over the shop; every change can be undone and redone.
//!
//! Set `RUST_LOG=lur=debug` to watch the history cursor move.
use chrono::NaiveDate;
use lur::rental::record::{Client, Movie};
use lur::rental::shop::{Shop, ShopBuilder};
use std::io;
use std::io::{BufRead, BufReader, Write};
use tracing_subscriber::EnvFilter;

const COMMAND_HELP: &str = "COMMANDS
 :h                          | Print command help.
 :l                          | List clients, movies, and rentals.
 :c ID NAME                  | Add a client.
 :m ID TITLE GENRE           | Add a movie.
 :x ID                       | Remove a client and its rentals.
 :rent MOVIE CLIENT FROM DUE | Rent a movie. Dates are YYYY-MM-DD.
 :ret RENTAL DATE            | Return a movie.
 :s TERM                     | Search clients and movies.
 :u [COUNT]                  | Undo COUNT changes.
 :r [COUNT]                  | Redo COUNT changes.
 :q                          | Quit the program.";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    println!("[Undo demonstration] Rental shop.\n\n{}", COMMAND_HELP);

    let mut shop = ShopBuilder::new()
        .client(Client::new("213", "Mirel"))
        .movie(Movie::new("566", "Cars", "life", "animation"))
        .build();

    let mut stdin = BufReader::new(io::stdin().lock());
    let mut line = String::new();
    loop {
        line.clear();

        write!(&mut io::stdout(), ":")?;
        io::stdout().flush()?;

        if 0 == stdin.read_line(&mut line)? {
            return Ok(());
        }

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("error: {}", e);
                continue;
            }
        };
        if let Command::Quit = command {
            return Ok(());
        }
        if let Err(e) = run(&mut shop, command) {
            println!("error: {}", e);
        }
    }
}

fn run(shop: &mut Shop, command: Command) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Help => println!("{}", COMMAND_HELP),
        Command::List => print(shop),
        Command::AddClient(id, name) => shop.add_client(Client::new(id, name))?,
        Command::AddMovie(id, title, genre) => {
            shop.add_movie(Movie::new(id, title, "", genre))?
        }
        Command::RemoveClient(id) => shop.remove_client(&id)?,
        Command::Rent(movie, client, from, due) => {
            let id = shop.rent_movie(&movie, &client, from, due)?;
            println!("rental {}", id);
        }
        Command::Return(id, on) => shop.return_movie(&id, on)?,
        Command::Search(term) => {
            for c in shop.search_clients(&term) {
                println!("client {}", c);
            }
            for m in shop.search_movies(&term) {
                println!("movie  {}", m);
            }
        }
        Command::Undo(count) => {
            shop.undo_multi(count)?;
            print(shop);
        }
        Command::Redo(count) => {
            shop.redo_multi(count)?;
            print(shop);
        }
        Command::Quit => {}
    }
    Ok(())
}

fn print(shop: &Shop) {
    for c in shop.clients_sorted_by_name() {
        println!("client {}{}", c, if c.worthy { "" } else { " (unworthy)" });
    }
    for m in shop.movies_sorted_by_title() {
        println!("movie  {}", m);
    }
    for r in shop.store().rentals() {
        println!("rental {}", r);
    }
}

enum Command {
    Help,
    List,
    AddClient(String, String),
    AddMovie(String, String, String),
    RemoveClient(String),
    Rent(String, String, NaiveDate, NaiveDate),
    Return(String, NaiveDate),
    Search(String),
    Undo(usize),
    Redo(usize),
    Quit,
}

impl Command {
    fn parse(line: &str) -> Result<Command, Box<dyn std::error::Error>> {
        let mut words = line.split_ascii_whitespace();
        let name = words.next().unwrap_or("h");
        let args: Vec<&str> = words.collect();

        let arg = |i: usize| -> Result<String, Box<dyn std::error::Error>> {
            args.get(i)
                .map(|s| s.to_string())
                .ok_or_else(|| format!("missing argument {}", i + 1).into())
        };
        let date = |i: usize| -> Result<NaiveDate, Box<dyn std::error::Error>> {
            Ok(arg(i)?.parse::<NaiveDate>()?)
        };
        let count = || -> Result<usize, Box<dyn std::error::Error>> {
            match args.first() {
                Some(s) => Ok(s.parse::<usize>()?),
                None => Ok(1),
            }
        };

        match name {
            "h" => Ok(Command::Help),
            "q" => Ok(Command::Quit),
            "l" => Ok(Command::List),
            "c" => Ok(Command::AddClient(arg(0)?, args[1..].join(" "))),
            "m" => Ok(Command::AddMovie(arg(0)?, arg(1)?, arg(2)?)),
            "x" => Ok(Command::RemoveClient(arg(0)?)),
            "rent" => Ok(Command::Rent(arg(0)?, arg(1)?, date(2)?, date(3)?)),
            "ret" => Ok(Command::Return(arg(0)?, date(1)?)),
            "s" => Ok(Command::Search(arg(0)?)),
            "u" => Ok(Command::Undo(count()?)),
            "r" => Ok(Command::Redo(count()?)),
            _ => Ok(Command::Help),
        }
    }
}
