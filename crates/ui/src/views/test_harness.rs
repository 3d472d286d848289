use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use exam_core::model::{
    AnswerOption, Exam, ExamId, OptionKey, Question, QuestionId, Subject, SubjectId, UserId,
    UserProfile,
};
use exam_core::quiz::QuizAttempt;
use exam_core::time::fixed_now;
use services::{
    AppServices, AuthService, AuthSession, Clock, InMemoryExamApi, QuizService, SessionToken,
};

use crate::context::{AppContext, UiApp, build_app_context};
use crate::views::exams::{exams_page, use_exam_search};
use crate::views::quiz::{AttemptScreen, use_quiz_session};
use crate::views::{
    DashboardView, ExamsView, ForgotPasswordView, LoginView, QuizView, RegisterView,
};

pub const TEST_TOKEN: &str = "test-token";

struct TestApp {
    clock: Clock,
    services: AppServices,
}

impl UiApp for TestApp {
    fn clock(&self) -> Clock {
        self.clock
    }

    fn quiz(&self) -> Arc<QuizService> {
        self.services.quiz()
    }

    fn auth(&self) -> Arc<AuthService> {
        self.services.auth()
    }
}

#[derive(Clone, PartialEq)]
pub enum ViewKind {
    Login,
    Register,
    ForgotPassword,
    Dashboard,
    Exams,
    /// Exams page whose search text the test can set.
    SearchableExams,
    Quiz(u32),
    /// Live attempt with its countdown, behind a mount switch the test controls.
    MountedQuiz(u32),
    Attempt(QuizAttempt),
}

/// Signals registered by harness components so tests can drive them directly.
#[derive(Clone, Default)]
pub struct HarnessHandles {
    query: Rc<RefCell<Option<Signal<String>>>>,
    attempt: Rc<RefCell<Option<Signal<Option<QuizAttempt>>>>>,
    mounted: Rc<RefCell<Option<Signal<bool>>>>,
}

impl HarnessHandles {
    pub fn query(&self) -> Signal<String> {
        self.query.borrow().expect("search registered")
    }

    pub fn attempt(&self) -> Signal<Option<QuizAttempt>> {
        self.attempt.borrow().expect("attempt registered")
    }

    pub fn mounted(&self) -> Signal<bool> {
        self.mounted.borrow().expect("mount switch registered")
    }
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    handles: HarnessHandles,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view.clone());
    use_context_provider(|| props.handles.clone());
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    let clock = use_context::<AppContext>().clock();
    match view {
        ViewKind::Login => rsx! { LoginView {} },
        ViewKind::Register => rsx! { RegisterView {} },
        ViewKind::ForgotPassword => rsx! { ForgotPasswordView {} },
        ViewKind::Dashboard => rsx! { DashboardView {} },
        ViewKind::Exams => rsx! { ExamsView {} },
        ViewKind::SearchableExams => rsx! { SearchableExams {} },
        ViewKind::Quiz(minutes) => rsx! { QuizView { minutes } },
        ViewKind::MountedQuiz(minutes) => rsx! { MountSwitch { minutes } },
        ViewKind::Attempt(attempt) => rsx! { AttemptPreview { attempt, clock } },
    }
}

/// Renders a prepared attempt without fetching or ticking.
#[component]
fn AttemptPreview(attempt: QuizAttempt, clock: Clock) -> Element {
    let attempt = use_signal(move || Some(attempt));
    rsx! { AttemptScreen { attempt, clock } }
}

#[component]
fn SearchableExams() -> Element {
    let handles = use_context::<HarnessHandles>();
    let search = use_exam_search();
    use_hook(|| *handles.query.borrow_mut() = Some(search.query));
    exams_page(search)
}

#[component]
fn MountSwitch(minutes: u32) -> Element {
    let handles = use_context::<HarnessHandles>();
    let mounted = use_signal(|| true);
    use_hook(|| *handles.mounted.borrow_mut() = Some(mounted));
    if mounted() {
        rsx! { LiveQuiz { minutes } }
    } else {
        rsx! { p { "Quiz closed" } }
    }
}

#[component]
fn LiveQuiz(minutes: u32) -> Element {
    let handles = use_context::<HarnessHandles>();
    let clock = use_context::<AppContext>().clock();
    let session = use_quiz_session(minutes);
    use_hook(|| *handles.attempt.borrow_mut() = Some(session.attempt));
    rsx! { AttemptScreen { attempt: session.attempt, clock } }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub api: InMemoryExamApi,
    pub handles: HarnessHandles,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Rebuild, then let pending resources and effects settle.
    pub async fn settle(&mut self) {
        self.rebuild();
        for _ in 0..4 {
            self.drive_async().await;
        }
    }

    /// Advance paused time one second at a time, letting the dom react after each.
    pub async fn advance_seconds(&mut self, seconds: u64) {
        for _ in 0..seconds {
            tokio::time::advance(Duration::from_secs(1)).await;
            self.drive_async().await;
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn key(raw: &str) -> OptionKey {
    OptionKey::new(raw).unwrap()
}

/// Three questions whose correct keys are `A1`, `A2`, `A1`.
pub fn sample_questions() -> Vec<Question> {
    ["A1", "A2", "A1"]
        .iter()
        .enumerate()
        .map(|(index, correct)| {
            Question::new(
                QuestionId::new(format!("q{}", index + 1)),
                format!("Sample question {}", index + 1),
                vec![
                    AnswerOption::new(key("A1"), "First choice"),
                    AnswerOption::new(key("A2"), "Second choice"),
                ],
                key(correct),
            )
            .unwrap()
        })
        .collect()
}

pub fn sample_profile() -> UserProfile {
    UserProfile {
        id: UserId::new("u1"),
        username: "mona".into(),
        first_name: "Mona".into(),
        last_name: "Adel".into(),
        email: "mona@example.com".into(),
        phone: "01023456789".into(),
        role: "user".into(),
        verified: true,
    }
}

pub fn sample_api() -> InMemoryExamApi {
    InMemoryExamApi::new()
        .with_token(TEST_TOKEN)
        .with_questions(sample_questions())
        .with_subjects(vec![
            Subject::new(SubjectId::new("s1"), "HTML", None),
            Subject::new(SubjectId::new("s2"), "CSS", None),
        ])
        .with_exams(vec![
            Exam::new(ExamId::new("e1"), "HTML Quiz", 20, Some(SubjectId::new("s1")), 25, true),
            Exam::new(ExamId::new("e2"), "CSS Quiz", 15, Some(SubjectId::new("s2")), 20, true),
        ])
}

pub fn sample_attempt() -> QuizAttempt {
    QuizAttempt::new(sample_questions(), fixed_now()).unwrap()
}

pub fn setup_view_harness(view: ViewKind, signed_in: bool) -> ViewHarness {
    setup_view_harness_with_api(view, signed_in, sample_api())
}

pub fn setup_view_harness_with_api(
    view: ViewKind,
    signed_in: bool,
    api: InMemoryExamApi,
) -> ViewHarness {
    let clock = Clock::fixed(fixed_now());
    let services = AppServices::with_api(Arc::new(api.clone()), clock);
    if signed_in {
        services.session().establish(AuthSession::new(
            SessionToken::new(TEST_TOKEN).unwrap(),
            Some(sample_profile()),
        ));
    }

    let app = Arc::new(TestApp { clock, services });
    let handles = HarnessHandles::default();
    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            view,
            handles: handles.clone(),
        },
    );

    ViewHarness { dom, api, handles }
}
