use crate::output;
use crate::protocol::Bank;
use crate::registers::{Class, EncodeError, Mode, Register, Value};
use crate::session;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("could not start the async runtime")]
    Runtime(#[source] std::io::Error),
    #[error("could not connect to the heat pump")]
    Connect(#[source] session::Error),
    #[error("could not read the {1} bank")]
    Read(#[source] session::Error, Bank),
    #[error("could not write the parameter `{1}`")]
    Write(#[source] session::Error, String),
    #[error("could not close the connection")]
    Close(#[source] session::Error),
    #[error("there is no parameter named or numbered `{0}`")]
    UnknownParameter(String),
    #[error("the value is not acceptable")]
    Encode(#[source] EncodeError),
    #[error("could not listen for Ctrl-C")]
    Signal(#[source] std::io::Error),
    #[error("could not produce the output")]
    Output(#[source] output::Error),
}

fn runtime() -> Result<tokio::runtime::Runtime, Error> {
    tokio::runtime::Builder::new_current_thread().enable_all().build().map_err(Error::Runtime)
}

#[derive(serde::Serialize)]
struct Reading<'a> {
    index: usize,
    name: &'a str,
    class: Class,
    value: Value,
    unit: &'static str,
    raw: u32,
}

const READING_HEADERS: [&str; 5] = ["Index", "Name", "Class", "Value", "Unit"];

fn output_reading(
    output: &mut output::Output,
    index: usize,
    register: &Register,
) -> Result<(), Error> {
    let value = register.decode();
    output
        .record(
            || {
                vec![
                    index.to_string(),
                    register.name().to_string(),
                    register.class().to_string(),
                    value.to_string(),
                    register.unit().to_string(),
                ]
            },
            || Reading {
                index,
                name: register.name(),
                class: register.class(),
                value: value.clone(),
                unit: register.unit(),
                raw: register.raw(),
            },
        )
        .map_err(Error::Output)
}

pub mod registers {
    use super::*;
    use crate::register_map::RegisterMap;

    /// Search and output the known registers of a bank.
    #[derive(clap::Parser)]
    pub struct Args {
        #[arg(value_enum)]
        bank: Bank,
        /// Only show registers whose index, name or family contain this text.
        filter: Option<String>,
        /// Include the slots without a known meaning.
        #[arg(long)]
        all: bool,
        #[clap(flatten)]
        output: output::Args,
    }

    #[derive(serde::Serialize)]
    pub struct RegisterSchema<'a> {
        pub index: usize,
        pub name: &'a str,
        pub family: &'static str,
        pub class: Class,
        pub unit: &'static str,
        pub mode: Mode,
    }

    impl RegisterSchema<'_> {
        pub fn is_match(&self, pattern: &str) -> bool {
            let pattern = pattern.to_lowercase();
            self.name.to_lowercase().contains(&pattern)
                || self.family.contains(&pattern)
                || self.index.to_string().contains(&pattern)
        }
    }

    pub fn run(args: Args) -> Result<(), Error> {
        let map = RegisterMap::for_bank(args.bank);
        let mut output = args.output.to_output().map_err(Error::Output)?;
        output
            .headers(&["Index", "Name", "Family", "Class", "Unit", "Mode"])
            .map_err(Error::Output)?;
        for (index, register) in map.iter_sorted() {
            let schema = RegisterSchema {
                index,
                name: register.name(),
                family: register.kind().name(),
                class: register.class(),
                unit: register.unit(),
                mode: register.mode(),
            };
            if !args.all && schema.name.starts_with("Unknown_") {
                continue;
            }
            if let Some(pattern) = &args.filter {
                if !schema.is_match(pattern) {
                    continue;
                }
            }
            output
                .record(
                    || {
                        vec![
                            schema.index.to_string(),
                            schema.name.to_string(),
                            schema.family.to_string(),
                            schema.class.to_string(),
                            schema.unit.to_string(),
                            schema.mode.to_string(),
                        ]
                    },
                    || &schema,
                )
                .map_err(Error::Output)?;
        }
        output.commit().map_err(Error::Output)
    }
}

pub mod read {
    use super::*;
    use crate::register_map::RegisterMap;

    /// Read a bank once and output its registers.
    #[derive(clap::Parser)]
    pub struct Args {
        #[arg(value_enum)]
        bank: Bank,
        /// Also output registers reading zero.
        #[arg(long)]
        all: bool,
        #[clap(flatten)]
        connection: session::Args,
        #[clap(flatten)]
        output: output::Args,
    }

    pub fn run(args: Args) -> Result<(), Error> {
        runtime()?.block_on(async {
            let mut session = args.connection.connect().await.map_err(Error::Connect)?;
            let mut map = RegisterMap::for_bank(args.bank);
            session.read(args.bank, &mut map).await.map_err(|e| Error::Read(e, args.bank))?;
            session.close().await.map_err(Error::Close)?;
            let mut output = args.output.to_output().map_err(Error::Output)?;
            output.headers(&READING_HEADERS).map_err(Error::Output)?;
            for (index, register) in map.iter_sorted() {
                if args.all || register.raw() != 0 {
                    output_reading(&mut output, index, register)?;
                }
            }
            output.commit().map_err(Error::Output)
        })
    }
}

pub mod watch {
    use super::*;
    use crate::register_map::RegisterMap;

    /// Read a bank repeatedly and output the registers that change, until interrupted.
    ///
    /// The first read outputs every register that is not zero.
    #[derive(clap::Parser)]
    pub struct Args {
        #[arg(value_enum)]
        bank: Bank,
        /// How often to read the bank.
        #[arg(long, default_value = "3s")]
        interval: humantime::Duration,
        #[clap(flatten)]
        connection: session::Args,
        #[clap(flatten)]
        output: output::Args,
    }

    pub fn run(args: Args) -> Result<(), Error> {
        runtime()?.block_on(async {
            let mut session = args.connection.connect().await.map_err(Error::Connect)?;
            let mut map = RegisterMap::for_bank(args.bank);
            let mut output = args.output.to_output().map_err(Error::Output)?;
            output.headers(&READING_HEADERS).map_err(Error::Output)?;
            // A zero period would make `interval` panic.
            let period = (*args.interval).max(std::time::Duration::from_millis(1));
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            let mut ctrl_c = std::pin::pin!(tokio::signal::ctrl_c());
            let mut first = true;
            loop {
                tokio::select! {
                    biased;
                    result = &mut ctrl_c => {
                        result.map_err(Error::Signal)?;
                        break;
                    }
                    _ = interval.tick() => {}
                }
                session.read(args.bank, &mut map).await.map_err(|e| Error::Read(e, args.bank))?;
                for (index, register) in map.iter_sorted() {
                    let changed = if first { register.raw() != 0 } else { register.has_changes() };
                    if changed {
                        output_reading(&mut output, index, register)?;
                    }
                }
                first = false;
                output.batch().map_err(Error::Output)?;
            }
            session.close().await.map_err(Error::Close)?;
            output.commit().map_err(Error::Output)
        })
    }
}

pub mod write {
    use super::*;
    use crate::register_map::RegisterMap;

    /// Write one parameter.
    ///
    /// The value is given the way `read` outputs it: a number in the register's unit, one of the
    /// register's codes, a timestamp or a duration.
    #[derive(clap::Parser)]
    pub struct Args {
        /// Name or index of the parameter.
        parameter: String,
        value: String,
        #[clap(flatten)]
        connection: session::Args,
    }

    pub fn run(args: Args) -> Result<(), Error> {
        let Args { parameter, value, connection } = args;
        let map = RegisterMap::parameters();
        let found = match parameter.parse::<usize>() {
            Ok(index) => map.get(index).map(|register| (index, register)),
            Err(_) => map.find(&parameter),
        };
        let Some((index, register)) = found else {
            return Err(Error::UnknownParameter(parameter));
        };
        let raw = register.encode(&Value::Text(value)).map_err(Error::Encode)?;
        let name = register.name().to_string();
        let index = u32::try_from(index).map_err(|_| Error::UnknownParameter(name.clone()))?;
        runtime()?.block_on(async {
            let mut session = connection.connect().await.map_err(Error::Connect)?;
            let acknowledged = session
                .write_parameter(index, raw)
                .await
                .map_err(|e| Error::Write(e, name.clone()))?;
            session.close().await.map_err(Error::Close)?;
            println!("{name} (parameter {index}) set to raw {raw}, acknowledged {acknowledged}");
            Ok(())
        })
    }
}

pub mod version {
    use super::*;
    use crate::register_map::RegisterMap;

    /// Output the firmware version of the controller.
    #[derive(clap::Parser)]
    pub struct Args {
        #[clap(flatten)]
        connection: session::Args,
    }

    pub fn run(args: Args) -> Result<(), Error> {
        runtime()?.block_on(async {
            let mut session = args.connection.connect().await.map_err(Error::Connect)?;
            let mut map = RegisterMap::calculations();
            session
                .read_calculations(&mut map)
                .await
                .map_err(|e| Error::Read(e, Bank::Calculations))?;
            session.close().await.map_err(Error::Close)?;
            println!("{}", map.version());
            Ok(())
        })
    }
}
