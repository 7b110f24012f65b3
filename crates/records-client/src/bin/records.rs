//! `records`: command-line front end for the recordkeeper API.
//!
//! Every subcommand performs one API call, or one step of the signup and
//! login exchanges, and prints the JSON answer.

use std::io::{self, Write};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, warn};
use tracing_subscriber::{EnvFilter, fmt};

use records_client::{
    AccountApi, ClientError, LoginInput, PetDetails, PetInput, PetUpdate, RecordsClient,
    SignupInput, StudentInput, StudentUpdate, UserInput, UserUpdate,
};

#[derive(Debug, Parser)]
#[command(name = "records", version, about = "Manage students, users and pets")]
struct Cli {
    /// Base URL of the recordkeeper server.
    #[arg(long, env = "RECORDS_API_URL", default_value = "http://localhost:5000")]
    api_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Student records.
    #[command(subcommand)]
    Students(StudentCommand),
    /// User accounts.
    #[command(subcommand)]
    Users(UserCommand),
    /// Pets and their owners.
    #[command(subcommand)]
    Pets(PetCommand),
    /// Aggregate figures.
    #[command(subcommand)]
    Stats(StatsCommand),
    /// One signup step; omit --age to receive the age prompt.
    Signup {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        age: Option<u32>,
    },
    /// One login step; omit --auth-key to receive the key prompt.
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        auth_key: Option<String>,
    },
    /// Fetch the greeting message.
    Message,
    /// Post a JSON document and print what the server received.
    Echo { json: String },
}

#[derive(Debug, Args)]
struct StudentFields {
    #[arg(long)]
    name: String,
    #[arg(long)]
    age: u32,
    #[arg(long)]
    grade: String,
}

#[derive(Debug, Subcommand)]
enum StudentCommand {
    List,
    Get { id: String },
    Create(StudentFields),
    /// Replace every field.
    Replace {
        id: String,
        #[command(flatten)]
        fields: StudentFields,
    },
    /// Change only the given fields.
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        age: Option<u32>,
        #[arg(long)]
        grade: Option<String>,
    },
    Delete { id: String },
}

#[derive(Debug, Args)]
struct UserFields {
    #[arg(long)]
    username: String,
    #[arg(long)]
    password: String,
    #[arg(long)]
    age: Option<u32>,
    #[arg(long)]
    role: Option<String>,
}

#[derive(Debug, Subcommand)]
enum UserCommand {
    List {
        /// Case-insensitive username fragment.
        #[arg(long)]
        search: Option<String>,
    },
    Get { id: String },
    /// Pets owned by the user.
    Pets { id: String },
    Create(UserFields),
    Replace {
        id: String,
        #[command(flatten)]
        fields: UserFields,
    },
    Update {
        id: String,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        age: Option<u32>,
        #[arg(long)]
        role: Option<String>,
    },
    Delete { id: String },
}

#[derive(Debug, Args)]
struct PetDetailArgs {
    #[arg(long)]
    breed: Option<String>,
    #[arg(long)]
    age: Option<u32>,
    #[arg(long)]
    gender: Option<String>,
    #[arg(long)]
    status: Option<String>,
    #[arg(long)]
    notes: Option<String>,
}

impl From<PetDetailArgs> for PetDetails {
    fn from(args: PetDetailArgs) -> Self {
        Self {
            breed: args.breed,
            age: args.age,
            gender: args.gender,
            status: args.status,
            notes: args.notes,
        }
    }
}

#[derive(Debug, Args)]
struct PetFields {
    #[arg(long)]
    owner_id: String,
    #[arg(long)]
    name: String,
    #[arg(long)]
    species: String,
    #[command(flatten)]
    details: PetDetailArgs,
}

impl From<PetFields> for PetInput {
    fn from(fields: PetFields) -> Self {
        Self {
            owner_id: fields.owner_id,
            name: fields.name,
            species: fields.species,
            details: fields.details.into(),
        }
    }
}

#[derive(Debug, Subcommand)]
enum PetCommand {
    List {
        /// Only pets owned by this user.
        #[arg(long)]
        user_id: Option<String>,
    },
    Get { id: String },
    Create(PetFields),
    Replace {
        id: String,
        #[command(flatten)]
        fields: PetFields,
    },
    Update {
        id: String,
        #[arg(long)]
        owner_id: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        species: Option<String>,
        #[command(flatten)]
        details: PetDetailArgs,
    },
    Delete { id: String },
}

#[derive(Debug, Subcommand)]
enum StatsCommand {
    /// Number of registered users.
    Users,
    /// Reported user ages.
    Ages,
    /// Number of pets.
    Pets,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("invalid JSON argument: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

fn emit<T: Serialize>(value: &T) -> Result<(), CliError> {
    let mut out = io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}

async fn students(client: &RecordsClient, command: StudentCommand) -> Result<(), CliError> {
    match command {
        StudentCommand::List => emit(&client.list_students().await?),
        StudentCommand::Get { id } => emit(&client.get_student(&id).await?),
        StudentCommand::Create(fields) => emit(&client.create_student(&fields.into()).await?),
        StudentCommand::Replace { id, fields } => {
            emit(&client.replace_student(&id, &fields.into()).await?)
        }
        StudentCommand::Update {
            id,
            name,
            age,
            grade,
        } => {
            let update = StudentUpdate { name, age, grade };
            emit(&client.update_student(&id, &update).await?)
        }
        StudentCommand::Delete { id } => emit(&client.delete_student(&id).await?),
    }
}

impl From<StudentFields> for StudentInput {
    fn from(fields: StudentFields) -> Self {
        Self {
            name: fields.name,
            age: fields.age,
            grade: fields.grade,
        }
    }
}

impl From<UserFields> for UserInput {
    fn from(fields: UserFields) -> Self {
        Self {
            username: fields.username,
            password: fields.password,
            age: fields.age,
            role: fields.role,
        }
    }
}

async fn users(client: &RecordsClient, command: UserCommand) -> Result<(), CliError> {
    match command {
        UserCommand::List { search } => emit(&client.list_users(search.as_deref()).await?),
        UserCommand::Get { id } => emit(&client.get_user(&id).await?),
        UserCommand::Pets { id } => emit(&client.user_pets(&id).await?),
        UserCommand::Create(fields) => emit(&client.create_user(&fields.into()).await?),
        UserCommand::Replace { id, fields } => {
            emit(&client.replace_user(&id, &fields.into()).await?)
        }
        UserCommand::Update {
            id,
            username,
            password,
            age,
            role,
        } => {
            let update = UserUpdate {
                username,
                password,
                age,
                role,
            };
            emit(&client.update_user(&id, &update).await?)
        }
        UserCommand::Delete { id } => emit(&client.delete_user(&id).await?),
    }
}

async fn pets(client: &RecordsClient, command: PetCommand) -> Result<(), CliError> {
    match command {
        PetCommand::List { user_id } => emit(&client.list_pets(user_id.as_deref()).await?),
        PetCommand::Get { id } => emit(&client.get_pet(&id).await?),
        PetCommand::Create(fields) => emit(&client.create_pet(&fields.into()).await?),
        PetCommand::Replace { id, fields } => emit(&client.replace_pet(&id, &fields.into()).await?),
        PetCommand::Update {
            id,
            owner_id,
            name,
            species,
            details,
        } => {
            let update = PetUpdate {
                owner_id,
                name,
                species,
                details: details.into(),
            };
            emit(&client.update_pet(&id, &update).await?)
        }
        PetCommand::Delete { id } => emit(&client.delete_pet(&id).await?),
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let client = RecordsClient::new(&cli.api_url)?;
    match cli.command {
        Command::Students(command) => students(&client, command).await,
        Command::Users(command) => users(&client, command).await,
        Command::Pets(command) => pets(&client, command).await,
        Command::Stats(StatsCommand::Users) => emit(&client.user_count().await?),
        Command::Stats(StatsCommand::Ages) => emit(&client.user_ages().await?),
        Command::Stats(StatsCommand::Pets) => emit(&client.pet_count().await?),
        Command::Signup {
            username,
            password,
            age,
        } => {
            let input = SignupInput {
                username,
                password,
                age,
            };
            emit(&client.signup(&input).await?)
        }
        Command::Login {
            username,
            password,
            auth_key,
        } => {
            let input = LoginInput {
                username,
                password,
                auth_key,
            };
            emit(&client.login(&input).await?)
        }
        Command::Message => emit(&client.message().await?),
        Command::Echo { json } => {
            let body: Value = serde_json::from_str(&json)?;
            emit(&client.echo(&body).await?)
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "records command failed");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("records").chain(args.iter().copied()))
            .expect("valid arguments")
    }

    #[rstest]
    fn student_create_reads_every_field() {
        let cli = parse(&[
            "--api-url",
            "http://records.test",
            "students",
            "create",
            "--name",
            "Ada",
            "--age",
            "13",
            "--grade",
            "8",
        ]);

        assert_eq!(cli.api_url, "http://records.test");
        let Command::Students(StudentCommand::Create(fields)) = cli.command else {
            panic!("expected students create, got {:?}", cli.command);
        };
        assert_eq!(fields.name, "Ada");
        assert_eq!(fields.age, 13);
        assert_eq!(fields.grade, "8");
    }

    #[rstest]
    fn login_auth_key_is_optional() {
        let cli = parse(&["login", "--username", "ada", "--password", "pw"]);
        let Command::Login { auth_key, .. } = cli.command else {
            panic!("expected login, got {:?}", cli.command);
        };
        assert!(auth_key.is_none());
    }

    #[rstest]
    #[case(&["students", "create", "--name", "Ada", "--grade", "8"])]
    #[case(&["students", "create", "--name", "Ada", "--age", "old", "--grade", "8"])]
    #[case(&["signup", "--username", "ada"])]
    fn incomplete_commands_are_rejected(#[case] args: &[&str]) {
        let parsed = Cli::try_parse_from(std::iter::once("records").chain(args.iter().copied()));
        assert!(parsed.is_err());
    }
}
