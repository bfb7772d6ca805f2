use std::path::PathBuf;
use rustrict::CensorStr;
use tracing::{info, warn, instrument};
use shared::{
    allocation::{Allocation, SubmitDecision, check_submission},
    models::*,
    validation::{normalize_reset_names, validate_config},
};
use crate::{
    config::AppConfig,
    error::{ApiError, StoreError},
    session::{Login, Session},
    store::{ConfigStore, LoginStore, VoteLedger, VoteRecord},
};

/// Page state machine over the config, login and ledger stores.
pub struct Controller {
    config: Config,
    config_store: ConfigStore,
    logins: LoginStore,
    ledger: VoteLedger,
    archive_dir: PathBuf,
}

impl Controller {
    pub fn open(paths: &AppConfig) -> Result<Self, StoreError> {
        let config_store = ConfigStore::new(&paths.config_file);
        let config = config_store.load()?;
        let logins = LoginStore::new(&paths.logins_file);
        logins.load_or_seed(&config)?;

        info!(
            "🗳️ {} projects, {} points, admin {}",
            config.project_count(),
            config.points,
            if config.admin.is_some() { "enabled" } else { "disabled" }
        );

        Ok(Self {
            config,
            config_store,
            logins,
            ledger: VoteLedger::new(&paths.votes_file),
            archive_dir: paths.archive_dir.clone(),
        })
    }

    pub fn config(&self) -> &Config { &self.config }

    /// Derives the visible state from the session's login and the current login file.
    pub fn state(&self, session: &Session) -> Result<SessionState, ApiError> {
        let state = match &session.login {
            None => SessionState::AwaitingLogin,
            Some(Login::Viewer) => SessionState::ResultsOnly,
            Some(Login::Admin) => SessionState::Admin,
            Some(Login::Voter(code)) => match self.logins.load()?.get(code) {
                Some(entry) if entry.has_voted => SessionState::Submitted,
                Some(_) => SessionState::Voting,
                None => SessionState::AwaitingLogin,
            },
        };
        Ok(state)
    }

    fn label(&self, session: &Session) -> Result<Option<String>, ApiError> {
        Ok(match &session.login {
            None => None,
            Some(Login::Viewer) => Some(RESULTS_ONLY_LABEL.to_string()),
            Some(Login::Admin) => Some("Admin".to_string()),
            Some(Login::Voter(code)) => self.logins.load()?.get(code).map(|e| e.label.clone()),
        })
    }

    pub fn view(&self, session: &mut Session) -> Result<SessionView, ApiError> {
        let state = self.state(session)?;
        match state {
            SessionState::AwaitingLogin if session.login.is_some() => session.reset(),
            SessionState::Voting => self.fit_allocation(session),
            _ => {}
        }

        Ok(SessionView {
            state,
            label: self.label(session)?,
            project_names: self.config.project_names.clone(),
            points_limit: self.config.points,
            allocation: session.allocation.values().to_vec(),
            total: session.allocation.total(),
            admin_enabled: self.config.admin.is_some(),
        })
    }

    #[instrument(skip(self, session, code))]
    pub fn login(&self, session: &mut Session, code: &str) -> Result<SessionView, ApiError> {
        if self.state(session)? != SessionState::AwaitingLogin {
            return Err(ApiError::NotAllowed("Already logged in"));
        }

        let login = if self.config.is_admin_code(code) {
            Login::Admin
        } else if code == RESULTS_ONLY_CODE {
            Login::Viewer
        } else if self.logins.load()?.contains_key(code) {
            Login::Voter(code.to_string())
        } else {
            warn!("Rejected unknown login code");
            return Err(ApiError::InvalidCredential);
        };

        info!("🔑 Login accepted ({})", match &login {
            Login::Voter(_) => "voter",
            Login::Viewer => "viewer",
            Login::Admin => "admin",
        });
        session.login = Some(login);
        session.allocation = Allocation::zeroed(self.config.project_count());
        self.view(session)
    }

    pub fn view_results(&self, session: &mut Session) -> Result<SessionView, ApiError> {
        if self.state(session)? != SessionState::AwaitingLogin {
            return Err(ApiError::NotAllowed("Already logged in"));
        }
        session.login = Some(Login::Viewer);
        self.view(session)
    }

    pub fn change_allocation(
        &self,
        session: &mut Session,
        index: usize,
        value: u32,
    ) -> Result<AllocationUpdate, ApiError> {
        self.require(session, SessionState::Voting, "Voting is not open for this session")?;
        self.fit_allocation(session);

        let clamp = session.allocation.apply(index, value, self.config.points)?;
        if let Some(notice) = &clamp.notice {
            info!("✂️ {}", notice);
        }

        Ok(AllocationUpdate {
            allocation: session.allocation.values().to_vec(),
            total: session.allocation.total(),
            notice: clamp.notice,
        })
    }

    #[instrument(skip(self, session))]
    pub fn submit(&self, session: &mut Session) -> Result<SessionView, ApiError> {
        self.require(session, SessionState::Voting, "Voting is not open for this session")?;
        let code = match &session.login {
            Some(Login::Voter(code)) => code.clone(),
            _ => return Err(ApiError::NotAllowed("Only voters can submit")),
        };

        if let SubmitDecision::RejectedTotalMismatch { actual } =
            check_submission(&session.allocation, self.config.points)
        {
            return Err(ApiError::TotalMismatch { expected: self.config.points, actual });
        }

        let mut logins = self.logins.load()?;
        match logins.get_mut(&code) {
            Some(entry) if entry.has_voted => return Err(ApiError::AlreadyVoted),
            Some(entry) => entry.has_voted = true,
            None => return Err(ApiError::InvalidCredential),
        }

        let rows = self.ledger.append(&VoteRecord {
            projects: self.config.project_names.clone(),
            points: session.allocation.values().to_vec(),
        })?;
        self.logins.save(&logins)?;
        info!("✅ Vote recorded, ledger now has {} rows", rows);

        self.view(session)
    }

    pub fn results(&self, session: &Session) -> Result<VoteResults, ApiError> {
        if !self.state(session)?.can_view_results() {
            return Err(ApiError::NotAllowed("Results are available after voting"));
        }

        Ok(match self.ledger.read()? {
            Some(contents) => VoteResults::from_rows(contents.header, contents.rows),
            None => VoteResults::from_rows(self.config.project_names.clone(), Vec::new()),
        })
    }

    #[instrument(skip(self, session, project_names))]
    pub fn admin_reset(
        &mut self,
        session: &mut Session,
        project_names: &[String],
    ) -> Result<SessionView, ApiError> {
        self.require(session, SessionState::Admin, "Admin access required")?;

        let project_names = normalize_reset_names(project_names)?;
        if let Some(name) = project_names.iter().find(|n| n.is_inappropriate()) {
            return Err(ApiError::InvalidInput(format!("Possible profanity detected in project name: {}", name)));
        }

        let mut logins = self.logins.load()?;
        for (code, entry) in logins.iter_mut() {
            if code != RESULTS_ONLY_CODE {
                entry.has_voted = false;
            }
        }

        let config = Config {
            project_names,
            points: RESET_POINTS,
            admin: self.config.admin.clone(),
            logins: logins.iter()
                .filter(|(code, _)| code.as_str() != RESULTS_ONLY_CODE)
                .map(|(code, entry)| (code.clone(), entry.clone()))
                .collect(),
        };
        validate_config(&config)?;

        if let Some(archived) = self.ledger.archive_and_clear(&self.archive_dir)? {
            info!("📦 Archived ledger to {}", archived.display());
        }
        self.config_store.save(&config)?;
        self.logins.save(&logins)?;
        info!("🔄 Reset votes, projects now {:?}", config.project_names);
        self.config = config;

        session.reset();
        self.view(session)
    }

    /// Zeroes an allocation left over from another round.
    fn fit_allocation(&self, session: &mut Session) {
        if session.allocation.len() != self.config.project_count()
            || session.allocation.total() > self.config.points
        {
            session.allocation = Allocation::zeroed(self.config.project_count());
        }
    }

    fn require(&self, session: &Session, state: SessionState, reason: &'static str) -> Result<(), ApiError> {
        if self.state(session)? == state {
            Ok(())
        } else {
            Err(ApiError::NotAllowed(reason))
        }
    }
}
