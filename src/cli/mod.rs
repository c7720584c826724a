//! Command-line front end.
//!
//! Each subcommand plays the role of one view: it opens a [`ViewScope`], loads
//! what it needs, performs the action, and prints the resulting rows and
//! notices.

mod args;

pub use args::*;

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::admin::{
    load_dashboard, read_policy, BlogsScreen, CoursesScreen, ListView, Listable,
    PaymentsScreen, PolicyEditor, RefundsScreen, Screen, SubscriptionsScreen, UsersScreen,
};
use crate::api::ApiClient;
use crate::errors::{AppError, AppResult};
use crate::generation::{CourseForm, CourseStudio, PreviewState};
use crate::models::{
    BlogFlag, CourseType, CreateBlogRequest, GeneratedCourseTree, PlanType, PolicyKind,
    RefundStatus, TopicCount, UpdateCourseRequest, UpdateUserRequest,
};
use crate::notify::Notices;
use crate::scope::ViewScope;
use crate::session::SessionContext;

/// Everything a command needs.
pub struct Context<'a> {
    pub client: &'a ApiClient,
    pub session: &'a mut SessionContext,
    pub scope: &'a ViewScope,
}

/// Run one command inside its own view scope.
pub async fn run(command: Command, ctx: Context<'_>) -> AppResult<()> {
    let view = ctx.scope.child(command.view_name());
    let ctx = Context {
        client: ctx.client,
        session: ctx.session,
        scope: &view,
    };

    match command {
        Command::Login { email, password } => {
            let user = ctx.scope.run(ctx.client.sign_in(&email, &password)).await?;
            ctx.session.sign_in(&user);
            println!("Signed in as {} ({})", user.email, user.plan_type.as_str());
            Ok(())
        }
        Command::Logout => {
            ctx.session.sign_out();
            println!("Signed out");
            Ok(())
        }
        Command::Whoami => {
            if !ctx.session.is_signed_in() {
                println!("Not signed in");
                return Ok(());
            }
            let plan = ctx.session.plan();
            println!(
                "{} <{}> uid={} plan={}{} admin={}",
                ctx.session.name().unwrap_or(""),
                ctx.session.email().unwrap_or(""),
                ctx.session.uid().unwrap_or(""),
                plan.as_str(),
                if plan.is_paid() { " (paid)" } else { "" },
                ctx.session.is_admin()
            );
            Ok(())
        }
        Command::Generate(args) => generate(args, ctx).await,
        Command::Users(cmd) => users(cmd, ctx).await,
        Command::Courses(cmd) => courses(cmd, ctx).await,
        Command::Blogs(cmd) => blogs(cmd, ctx).await,
        Command::Payments(cmd) => payments(cmd, ctx).await,
        Command::Refunds(cmd) => refunds(cmd, ctx).await,
        Command::Subscriptions(cmd) => subscriptions(cmd, ctx).await,
        Command::Policy(cmd) => policy(cmd, ctx).await,
        Command::Dashboard => {
            let stats = load_dashboard(ctx.client, ctx.session, ctx.scope).await?;
            println!("users:          {}", stats.users);
            println!("courses:        {}", stats.courses);
            println!("revenue:        {}", format_amount(stats.total_revenue));
            println!(
                "paid / free:    {} / {} ({:.1}% paid)",
                stats.paid_users,
                stats.free_users,
                stats.paid_ratio()
            );
            println!("new users:      {}", stats.recent_users);
            println!("new courses:    {}", stats.recent_courses);
            Ok(())
        }
    }
}

/// What to do with a previewed course.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    Save,
    Regenerate,
    /// Drop the subtopic at this zero-based index, then regenerate
    DropSubtopic(usize),
    Quit,
}

/// Parse one answer to the preview prompt. Subtopics are numbered from 1.
fn parse_choice(line: &str, subtopics: usize) -> Option<Choice> {
    let mut parts = line.split_whitespace();
    let choice = match parts.next()?.to_lowercase().as_str() {
        "s" | "save" => Choice::Save,
        "r" | "regenerate" => Choice::Regenerate,
        "q" | "quit" => Choice::Quit,
        "x" | "drop" => {
            let n: usize = parts.next()?.parse().ok()?;
            if n == 0 || n > subtopics {
                return None;
            }
            Choice::DropSubtopic(n - 1)
        }
        _ => return None,
    };
    parts.next().is_none().then_some(choice)
}

fn print_tree(tree: &GeneratedCourseTree) {
    for (main, topics) in &tree.0 {
        println!("{}", main);
        for topic in topics {
            println!("  {}", topic.title);
            for sub in &topic.subtopics {
                println!("    - {}", sub.title);
            }
        }
    }
}

async fn generate(args: GenerateArgs, ctx: Context<'_>) -> AppResult<()> {
    let mut form = CourseForm::new(args.topic);
    form.topic_count = TopicCount::from_str(&args.count)
        .ok_or_else(|| AppError::Validation(format!("Invalid topic count: {}", args.count)))?;
    form.course_type = CourseType::from_str(&args.course_type).ok_or_else(|| {
        AppError::Validation(format!("Invalid course type: {}", args.course_type))
    })?;
    form.language = args.language;

    let mut notices = Notices::new();
    for subtopic in &args.subtopics {
        form.add_subtopic(subtopic, &mut notices);
    }
    print_notices(&mut notices);

    let mut studio = CourseStudio::new(form);
    if args.dry_run {
        println!("{}", studio.prompt()?);
        return Ok(());
    }

    let mut answers = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let generated = studio.submit(ctx.client, ctx.scope).await.map(|_| ());
        print_notices(&mut studio.notices);
        tracing::debug!("generation settled, loading={}", studio.is_loading());
        generated?;
        if let PreviewState::Previewing(tree) = studio.state() {
            print_tree(tree);
        }

        let choice = if args.confirm {
            Choice::Save
        } else {
            ask(&mut answers, ctx.scope, studio.form.subtopics()).await?
        };

        match choice {
            Choice::Save => {
                let confirmed = studio.confirm(ctx.client, ctx.session, ctx.scope).await;
                print_notices(&mut studio.notices);
                let course_id = confirmed?;
                println!("Saved course {}", course_id);
                return Ok(());
            }
            Choice::Regenerate => {
                studio.edit();
            }
            Choice::DropSubtopic(index) => {
                studio.edit();
                if let Some(dropped) = studio.form.remove_subtopic(index) {
                    println!("Dropped subtopic {}", dropped);
                }
            }
            Choice::Quit => {
                studio.edit();
                println!("Preview discarded");
                return Ok(());
            }
        }
    }
}

/// Ask what to do with the preview until a valid answer arrives.
/// End of input counts as quitting.
async fn ask<R>(
    answers: &mut tokio::io::Lines<R>,
    scope: &ViewScope,
    subtopics: &[String],
) -> AppResult<Choice>
where
    R: tokio::io::AsyncBufRead + Unpin,
{
    loop {
        eprint!("[s]ave, [r]egenerate, [x N] drop subtopic N and regenerate, [q]uit: ");
        let line = scope
            .run(async { answers.next_line().await.map_err(AppError::from) })
            .await?;
        let Some(line) = line else {
            return Ok(Choice::Quit);
        };
        match parse_choice(&line, subtopics.len()) {
            Some(choice) => return Ok(choice),
            None => eprintln!("Unrecognised answer: {}", line.trim()),
        }
    }
}

/// Move the session's plan hint along when the signed-in user was changed.
fn sync_own_plan(session: &mut SessionContext, ids: &[String], plan: PlanType) {
    if session
        .uid()
        .is_some_and(|uid| ids.iter().any(|id| id == uid))
    {
        session.set_plan(plan);
    }
}

fn parse_plan(raw: &str) -> AppResult<PlanType> {
    PlanType::from_str(raw).ok_or_else(|| AppError::Validation(format!("Invalid plan: {}", raw)))
}

async fn users(cmd: UsersCommand, ctx: Context<'_>) -> AppResult<()> {
    let mut screen = UsersScreen::load(ctx.client, ctx.scope).await?;
    let result = match cmd {
        UsersCommand::List(list) => {
            show(&mut screen.view, &list, |u| {
                format!(
                    "{}  {}  {}  {}",
                    u.id,
                    u.email,
                    u.name,
                    u.plan_type.as_str()
                )
            });
            Ok(())
        }
        UsersCommand::Update {
            id,
            name,
            email,
            plan,
        } => {
            let plan_type = plan.as_deref().map(parse_plan).transpose()?;
            if name.is_none() && email.is_none() && plan_type.is_none() {
                return Err(AppError::Validation(
                    "Pass --name, --email, or --plan".to_string(),
                ));
            }
            let request = UpdateUserRequest {
                id: id.clone(),
                name,
                email,
                plan_type,
            };
            let updated = screen.update(ctx.client, ctx.scope, request).await;
            if let (Ok(()), Some(plan)) = (&updated, plan_type) {
                sync_own_plan(ctx.session, &[id], plan);
            }
            updated
        }
        UsersCommand::Delete(targets) => match targets.single() {
            Some(id) => screen.delete(ctx.client, ctx.scope, id).await,
            None => {
                select_targets(&mut screen, &targets);
                screen.bulk_delete(ctx.client, ctx.scope).await.map(|_| ())
            }
        },
        UsersCommand::SetPlan { plan, targets } => {
            let plan = parse_plan(&plan)?;
            select_targets(&mut screen, &targets);
            let ids = screen.view.selected_ids();
            let changed = screen
                .bulk_change_plan(ctx.client, ctx.scope, plan)
                .await
                .map(|_| ());
            if changed.is_ok() {
                sync_own_plan(ctx.session, &ids, plan);
            }
            changed
        }
    };
    print_notices(&mut screen.notices);
    result
}

async fn courses(cmd: CoursesCommand, ctx: Context<'_>) -> AppResult<()> {
    let mut screen = CoursesScreen::load(ctx.client, ctx.scope).await?;
    let result = match cmd {
        CoursesCommand::List(list) => {
            show(&mut screen.view, &list, |c| {
                format!(
                    "{}  {}  {}  {}  {}",
                    c.id,
                    c.main_topic,
                    c.course_type,
                    c.lang,
                    if c.approved { "approved" } else { "pending" }
                )
            });
            Ok(())
        }
        CoursesCommand::Update {
            id,
            topic,
            course_type,
        } => {
            let course_type = course_type
                .as_deref()
                .map(|raw| {
                    CourseType::from_str(raw)
                        .map(|kind| kind.as_str().to_string())
                        .ok_or_else(|| {
                            AppError::Validation(format!("Invalid course type: {}", raw))
                        })
                })
                .transpose()?;
            let main_topic = topic.map(|t| t.trim().to_lowercase());
            if main_topic.is_none() && course_type.is_none() {
                return Err(AppError::Validation("Pass --topic or --type".to_string()));
            }
            let request = UpdateCourseRequest {
                id,
                main_topic,
                course_type,
            };
            screen.update(ctx.client, ctx.scope, request).await
        }
        CoursesCommand::Approve(targets) => {
            select_targets(&mut screen, &targets);
            screen.bulk_approve(ctx.client, ctx.scope).await.map(|_| ())
        }
        CoursesCommand::Delete(targets) => match targets.single() {
            Some(id) => screen.delete(ctx.client, ctx.scope, id).await,
            None => {
                select_targets(&mut screen, &targets);
                screen.bulk_delete(ctx.client, ctx.scope).await.map(|_| ())
            }
        },
    };
    print_notices(&mut screen.notices);
    result
}

async fn blogs(cmd: BlogsCommand, ctx: Context<'_>) -> AppResult<()> {
    let mut screen = BlogsScreen::load(ctx.client, ctx.scope).await?;
    let result = match cmd {
        BlogsCommand::List(list) => {
            show(&mut screen.view, &list, |b| {
                let mut flags = Vec::new();
                if b.featured {
                    flags.push("featured");
                }
                if b.popular {
                    flags.push("popular");
                }
                if b.image.is_some() {
                    flags.push("image");
                }
                format!(
                    "{}  {}  [{}]  {}  {}",
                    b.id,
                    b.title,
                    b.category,
                    flags.join(","),
                    b.tag_list().join(" #")
                )
            });
            Ok(())
        }
        BlogsCommand::Create {
            title,
            excerpt,
            content,
            category,
            tags,
            image,
        } => {
            let mut request = CreateBlogRequest {
                title,
                excerpt,
                content: fs::read_to_string(&content)?,
                category,
                tags,
                image: None,
            };
            if let Some(path) = image {
                let bytes = fs::read(&path)?;
                request = request.with_image(&bytes, guess_mime(&path));
            }
            screen.create(ctx.client, ctx.scope, request).await
        }
        BlogsCommand::Toggle { id, flag } => {
            let flag = BlogFlag::from_str(&flag)
                .ok_or_else(|| AppError::Validation(format!("Invalid flag: {}", flag)))?;
            screen
                .toggle_flag(ctx.client, ctx.scope, &id, flag)
                .await
                .map(|value| println!("{} {} = {}", id, flag.as_str(), value))
        }
        BlogsCommand::Image { id } => match screen.view.get(&id) {
            Some(post) => {
                match post.image_url() {
                    Some(url) => println!("{}", url),
                    None => println!("{} has no image", id),
                }
                Ok(())
            }
            None => Err(AppError::Validation(format!("Unknown blog {}", id))),
        },
        BlogsCommand::Delete { id } => screen.delete(ctx.client, ctx.scope, &id).await,
    };
    print_notices(&mut screen.notices);
    result
}

async fn payments(cmd: PaymentsCommand, ctx: Context<'_>) -> AppResult<()> {
    let PaymentsCommand::List { list, from, to } = cmd;
    let mut screen = PaymentsScreen::load(ctx.client, ctx.scope).await?;
    apply_list_args(&mut screen.view, &list);

    let from = from.as_deref().map(parse_date).transpose()?;
    let to = to.as_deref().map(parse_date).transpose()?;
    let rows = screen.within(from, to);
    for p in &rows {
        println!(
            "{}  {}  {}  {}  {}",
            p.id,
            p.date.format("%Y-%m-%d"),
            p.email,
            format_amount(p.amount),
            p.status.as_str()
        );
    }
    let summary = PaymentsScreen::summarize(&rows);
    println!(
        "{} payments: completed {}, pending {}, refunded {}",
        summary.count,
        format_amount(summary.completed),
        format_amount(summary.pending),
        format_amount(summary.refunded)
    );
    Ok(())
}

async fn refunds(cmd: RefundsCommand, ctx: Context<'_>) -> AppResult<()> {
    let mut screen = RefundsScreen::load(ctx.client, ctx.scope).await?;
    let result = match cmd {
        RefundsCommand::List(list) => {
            show(&mut screen.view, &list, |r| {
                format!(
                    "{}  payment={}  {}  {}  {}",
                    r.id,
                    r.payment_id,
                    format_amount(r.amount),
                    r.status.as_str(),
                    r.reason
                )
            });
            Ok(())
        }
        RefundsCommand::Process { decision, targets } => {
            let status = RefundStatus::from_str(&decision)
                .filter(|s| *s != RefundStatus::Pending)
                .ok_or_else(|| AppError::Validation(format!("Invalid decision: {}", decision)))?;
            match targets.single() {
                Some(id) => screen.process(ctx.client, ctx.scope, id, status).await,
                None => {
                    select_targets(&mut screen, &targets);
                    screen
                        .bulk_process(ctx.client, ctx.scope, status)
                        .await
                        .map(|_| ())
                }
            }
        }
    };
    print_notices(&mut screen.notices);
    result
}

async fn subscriptions(cmd: SubscriptionsCommand, ctx: Context<'_>) -> AppResult<()> {
    let mut screen = SubscriptionsScreen::load(ctx.client, ctx.scope).await?;
    let result = match cmd {
        SubscriptionsCommand::List(list) => {
            show(&mut screen.view, &list, |s| {
                format!(
                    "{}  {}  {}  {}  until {}",
                    s.id,
                    s.email,
                    s.plan,
                    s.status.as_str(),
                    s.end_date.format("%Y-%m-%d")
                )
            });
            Ok(())
        }
        SubscriptionsCommand::Cancel(targets) => match targets.single() {
            Some(id) => screen.cancel(ctx.client, ctx.scope, id).await,
            None => {
                select_targets(&mut screen, &targets);
                screen.bulk_cancel(ctx.client, ctx.scope).await.map(|_| ())
            }
        },
        SubscriptionsCommand::Renew { id } => screen.renew(ctx.client, ctx.scope, &id).await,
    };
    print_notices(&mut screen.notices);
    result
}

async fn policy(cmd: PolicyCommand, ctx: Context<'_>) -> AppResult<()> {
    match cmd {
        PolicyCommand::Show { kind } => {
            let kind = parse_policy_kind(&kind)?;
            let html = read_policy(ctx.client, ctx.session, ctx.scope, kind).await?;
            println!("{}", html);
            Ok(())
        }
        PolicyCommand::Set { kind, file } => {
            let kind = parse_policy_kind(&kind)?;
            let html = fs::read_to_string(&file)?;
            let mut editor = PolicyEditor::load(ctx.client, ctx.session, ctx.scope).await?;
            editor.edit(kind, html);
            let result = editor
                .save(ctx.client, ctx.session, ctx.scope, kind)
                .await
                .map(|_| ());
            print_notices(&mut editor.notices);
            result
        }
    }
}

fn parse_policy_kind(raw: &str) -> AppResult<PolicyKind> {
    PolicyKind::from_str(raw)
        .ok_or_else(|| AppError::Validation(format!("Unknown policy page: {}", raw)))
}

fn parse_date(raw: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|e| AppError::Validation(format!("Invalid date {}: {}", raw, e)))
}

fn apply_list_args<T: Listable>(view: &mut ListView<T>, list: &ListArgs) {
    view.set_query(list.search.as_str());
    for (facet, value) in &list.filters {
        view.set_filter(facet, value);
    }
    view.set_page_size(list.page_size);
    view.set_page(list.page);
}

fn show<T: Listable>(view: &mut ListView<T>, list: &ListArgs, render: impl Fn(&T) -> String) {
    apply_list_args(view, list);
    for item in view.page_items() {
        println!("{}", render(item));
    }
    let search = if view.query().is_empty() {
        String::new()
    } else {
        format!(" for {:?}", view.query())
    };
    println!(
        "page {}/{} ({} matching{}, {} total)",
        view.page() + 1,
        view.page_count().max(1),
        view.visible().len(),
        search,
        view.items().len()
    );
}

/// Select the rows a bulk command targets. With `--all` that is every row
/// matching the narrowing search and filters; otherwise the named ids, with a
/// notice for ids that are not loaded.
fn select_targets<T: Listable>(screen: &mut Screen<T>, targets: &Targets) {
    if targets.all {
        screen.view.set_query(targets.search.as_str());
        for (facet, value) in &targets.filters {
            screen.view.set_filter(facet, value);
        }
        screen.view.toggle_all();
        return;
    }
    for id in &targets.ids {
        if screen.view.get(id).is_none() {
            screen.notices.info(format!("Skipping unknown id {}", id));
            continue;
        }
        if !screen.view.selection().contains(id) {
            screen.view.toggle(id);
        }
    }
}

fn print_notices(notices: &mut Notices) {
    for notice in notices.drain() {
        eprintln!("{}", notice);
    }
}

fn format_amount(minor: i64) -> String {
    let abs = minor.unsigned_abs();
    let sign = if minor < 0 { "-" } else { "" };
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}

fn guess_mime(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}
