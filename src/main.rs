use std::fmt::Display;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand};

use levelup::api::{
    CreateQuizRequest, QuestionRequest, Quiz, QuizQuery, UpdateQuizRequest, Visibility,
};
use levelup::app::AppContext;
use levelup::config::Config;
use levelup::logging::init_tracing;
use levelup::state::ViewState;
use levelup::viewmodel::{AuthViewModel, QuestionChange};

#[derive(Parser, Debug)]
#[command(name = "levelup", version, about = "Level Up Journey quiz client")]
struct Cli {
    /// Config file (default: platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and store the tokens
    SignIn(CredentialsArgs),
    /// Create an account, then sign in
    SignUp(CredentialsArgs),
    /// Exchange the refresh token for a new pair
    Refresh,
    /// Forget the stored tokens
    Logout,
    /// Show the signed-in user
    Whoami,
    #[command(subcommand)]
    Users(UsersCommand),
    /// List roles
    Roles,
    #[command(subcommand)]
    Quizzes(QuizzesCommand),
    #[command(subcommand)]
    Questions(QuestionsCommand),
}

#[derive(Args, Debug)]
struct CredentialsArgs {
    #[arg(long)]
    email: String,
    #[arg(long)]
    password: String,
}

#[derive(Subcommand, Debug)]
enum UsersCommand {
    List,
    Show { id: String },
}

#[derive(Subcommand, Debug)]
enum QuizzesCommand {
    /// List quizzes created by the signed-in user
    List {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long, default_value_t = 20)]
        size: u32,
    },
    Show {
        id: i64,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        category: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, default_value = "PRIVATE")]
        visibility: Visibility,
    },
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        visibility: Option<Visibility>,
    },
    Delete {
        id: i64,
    },
    Publish {
        id: i64,
    },
}

#[derive(Subcommand, Debug)]
enum QuestionsCommand {
    /// Add a multiple-choice question
    Add {
        quiz_id: i64,
        #[arg(long)]
        content: String,
        /// Answer text; repeat for each answer
        #[arg(long = "answer", required = true)]
        answers: Vec<String>,
        /// Zero-based index of the correct answer
        #[arg(long)]
        correct: usize,
        #[arg(long, default_value_t = 10)]
        points: u32,
        #[arg(long = "time-limit", default_value_t = 30)]
        time_limit: u32,
    },
    Delete {
        quiz_id: i64,
        question_id: i64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("loading configuration")?;
    tracing::debug!(base_url = %config.api.base_url, "Configuration loaded");

    let app = AppContext::new(&config).context("building HTTP client")?;
    run(cli.command, &app).await
}

async fn run(command: Command, app: &AppContext) -> Result<()> {
    let auth = app.auth_view_model();

    match command {
        Command::SignIn(args) => {
            let state = auth.sign_in(&args.email, &args.password).settled().await;
            let credential = settle(state)?;
            println!("Signed in as {} ({})", credential.user_email, credential.user_id);
        }
        Command::SignUp(args) => {
            let state = auth.sign_up(&args.email, &args.password).settled().await;
            let credential = settle(state)?;
            println!("Account created, signed in as {}", credential.user_email);
        }
        Command::Refresh => {
            settle(auth.refresh().settled().await)?;
            println!("Tokens refreshed");
        }
        Command::Logout => {
            auth.logout()?;
            println!("Signed out");
        }
        Command::Whoami => match auth.current_credential()? {
            Some(credential) => println!("{} ({})", credential.user_email, credential.user_id),
            None => println!("Not signed in"),
        },
        Command::Users(UsersCommand::List) => {
            let users = settle(app.user_view_model().load_users().settled().await)?;
            for user in users {
                println!("{}\t{}", user.id, user.email_address);
            }
        }
        Command::Users(UsersCommand::Show { id }) => {
            let user = settle(app.user_view_model().load_user(&id).settled().await)?;
            let roles: Vec<_> = user.roles.iter().map(|r| r.name.as_str()).collect();
            println!("{}\t{}\t[{}]", user.id, user.email_address, roles.join(", "));
        }
        Command::Roles => {
            let roles = settle(app.user_view_model().load_roles().settled().await)?;
            for role in roles {
                println!("{}\t{}", role.id, role.name);
            }
        }
        Command::Quizzes(command) => run_quizzes(command, app, &auth).await?,
        Command::Questions(command) => run_questions(command, app, &auth).await?,
    }

    Ok(())
}

async fn run_quizzes(command: QuizzesCommand, app: &AppContext, auth: &AuthViewModel) -> Result<()> {
    let user_id = signed_in_user(auth)?;
    let quizzes = app.quiz_view_model();

    match command {
        QuizzesCommand::List {
            category,
            search,
            page,
            size,
        } => {
            let query = QuizQuery {
                category,
                search,
                page,
                size,
                ..QuizQuery::for_user(&user_id)
            };
            let list = settle(quizzes.get_my_quizzes(query).settled().await)?;
            if list.is_empty() {
                println!("No quizzes");
            }
            for quiz in &list {
                print_quiz_line(quiz);
            }
        }
        QuizzesCommand::Show { id } => {
            let quiz = settle(quizzes.get_quiz(id, &user_id).settled().await)?;
            print_quiz_line(&quiz);
            for question in &quiz.questions {
                println!("  #{} {} ({} pts)", question.id, question.content, question.points);
                for answer in &question.answers {
                    let mark = if answer.is_correct { "*" } else { " " };
                    println!("    {} {}", mark, answer.content);
                }
            }
        }
        QuizzesCommand::Create {
            name,
            category,
            description,
            visibility,
        } => {
            let request = CreateQuizRequest {
                name,
                description,
                category,
                cover_image_url: None,
                visibility,
                creator_id: user_id,
            };
            let created = settle(quizzes.create_quiz(request).settled().await)?;
            println!("Created quiz {} {}", created.id, created.message);
        }
        QuizzesCommand::Update {
            id,
            name,
            category,
            description,
            visibility,
        } => {
            let request = UpdateQuizRequest {
                name,
                description,
                category,
                cover_image_url: None,
                visibility,
            };
            println!("{}", settle(quizzes.update_quiz(id, &user_id, request).settled().await)?);
        }
        QuizzesCommand::Delete { id } => {
            println!("{}", settle(quizzes.delete_quiz(id, &user_id).settled().await)?);
        }
        QuizzesCommand::Publish { id } => {
            println!("{}", settle(quizzes.publish_quiz(id, &user_id).settled().await)?);
        }
    }

    Ok(())
}

async fn run_questions(
    command: QuestionsCommand,
    app: &AppContext,
    auth: &AuthViewModel,
) -> Result<()> {
    let user_id = signed_in_user(auth)?;
    let quizzes = app.quiz_view_model();

    let change = match command {
        QuestionsCommand::Add {
            quiz_id,
            content,
            answers,
            correct,
            points,
            time_limit,
        } => {
            let request =
                QuestionRequest::multiple_choice(content, &answers, correct, points, time_limit);
            request.validate()?;
            settle(quizzes.add_question(quiz_id, &user_id, request).settled().await)?
        }
        QuestionsCommand::Delete {
            quiz_id,
            question_id,
        } => settle(
            quizzes
                .delete_question(quiz_id, question_id, &user_id)
                .settled()
                .await,
        )?,
    };

    match change {
        QuestionChange::Added(question) => println!("Added question {}", question.id),
        QuestionChange::Updated(question) => println!("Updated question {}", question.id),
        QuestionChange::Deleted { question_id, .. } => println!("Deleted question {}", question_id),
    }
    Ok(())
}

fn signed_in_user(auth: &AuthViewModel) -> Result<String> {
    match auth.current_credential()? {
        Some(credential) => Ok(credential.user_id),
        None => bail!("Not signed in. Run `levelup sign-in` first."),
    }
}

/// Turn a settled state into the payload or a printable error.
fn settle<T>(state: ViewState<T>) -> Result<T> {
    match state {
        ViewState::Success(value) => Ok(value),
        ViewState::Error(message) => Err(anyhow!(message)),
        other => Err(anyhow!("operation did not complete ({})", label(&other))),
    }
}

fn label<T>(state: &ViewState<T>) -> impl Display {
    match state {
        ViewState::Idle => "idle",
        ViewState::Loading => "loading",
        ViewState::Success(_) => "success",
        ViewState::Error(_) => "error",
    }
}

fn print_quiz_line(quiz: &Quiz) {
    let visibility = match quiz.visibility {
        Visibility::Public => "public",
        Visibility::Private => "private",
    };
    println!(
        "{}\t{}\t{}\t{}\t{} questions",
        quiz.id,
        quiz.name,
        quiz.category,
        visibility,
        quiz.questions.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_question_add() {
        let cli = Cli::try_parse_from([
            "levelup", "questions", "add", "7", "--content", "2 + 2?", "--answer", "3",
            "--answer", "4", "--correct", "1",
        ])
        .unwrap();

        match cli.command {
            Command::Questions(QuestionsCommand::Add {
                quiz_id,
                answers,
                correct,
                points,
                ..
            }) => {
                assert_eq!(quiz_id, 7);
                assert_eq!(answers, vec!["3", "4"]);
                assert_eq!(correct, 1);
                assert_eq!(points, 10);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn parse_quiz_create_visibility() {
        let cli = Cli::try_parse_from([
            "levelup", "quizzes", "create", "--name", "Math Quiz", "--category", "MATHEMATICS",
            "--visibility", "public",
        ])
        .unwrap();

        match cli.command {
            Command::Quizzes(QuizzesCommand::Create { visibility, .. }) => {
                assert_eq!(visibility, Visibility::Public)
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn settle_maps_states() {
        assert_eq!(settle(ViewState::Success(3)).unwrap(), 3);
        assert_eq!(
            settle::<u32>(ViewState::Error("HTTP 500".into()))
                .unwrap_err()
                .to_string(),
            "HTTP 500"
        );
        assert!(settle::<u32>(ViewState::Idle).is_err());
    }
}
