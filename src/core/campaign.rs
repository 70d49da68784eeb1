use crate::core::uploader::ProspectUploader;
use crate::domain::model::{ParseMode, UploadedFile};
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::validate_email;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WizardStep {
    Prospects,
    Content,
    Media,
    Review,
    Launched,
}

impl WizardStep {
    fn next(self) -> Option<Self> {
        match self {
            WizardStep::Prospects => Some(WizardStep::Content),
            WizardStep::Content => Some(WizardStep::Media),
            WizardStep::Media => Some(WizardStep::Review),
            WizardStep::Review | WizardStep::Launched => None,
        }
    }

    fn previous(self) -> Option<Self> {
        match self {
            WizardStep::Content => Some(WizardStep::Prospects),
            WizardStep::Media => Some(WizardStep::Content),
            WizardStep::Review => Some(WizardStep::Media),
            WizardStep::Prospects | WizardStep::Launched => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignSummary {
    pub prospects: usize,
    pub test_emails: usize,
}

/// 建立活動精靈的狀態，進入精靈時建立、離開時丟棄
#[derive(Debug)]
pub struct CampaignSession {
    step: WizardStep,
    uploader: ProspectUploader,
    test_emails: Vec<String>,
}

impl CampaignSession {
    pub fn new(mode: ParseMode) -> Self {
        Self {
            step: WizardStep::Prospects,
            uploader: ProspectUploader::new(mode),
            test_emails: Vec::new(),
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn uploader(&self) -> &ProspectUploader {
        &self.uploader
    }

    pub fn upload_prospects(&mut self, file: &UploadedFile) -> Result<usize> {
        self.uploader.upload(file)
    }

    pub fn next(&mut self) -> Result<WizardStep> {
        if self.step == WizardStep::Prospects && !self.uploader.can_proceed() {
            return Err(EtlError::ValidationError {
                message: "Upload at least one prospect before proceeding".to_string(),
            });
        }

        let next = self.step.next().ok_or_else(|| EtlError::ValidationError {
            message: format!("Cannot advance past {:?}", self.step),
        })?;
        tracing::debug!("Wizard step {:?} -> {:?}", self.step, next);
        self.step = next;
        Ok(next)
    }

    pub fn back(&mut self) -> WizardStep {
        if let Some(previous) = self.step.previous() {
            self.step = previous;
        }
        self.step
    }

    pub fn launch(&mut self) -> Result<CampaignSummary> {
        if self.step != WizardStep::Review {
            return Err(EtlError::ValidationError {
                message: "Campaign can only be launched from the review step".to_string(),
            });
        }

        self.step = WizardStep::Launched;
        let summary = self.summary();
        tracing::info!(
            "🚀 Campaign launched with {} prospects and {} test recipients",
            summary.prospects,
            summary.test_emails
        );
        Ok(summary)
    }

    pub fn add_test_email(&mut self, address: &str) -> Result<()> {
        let address = address.trim();
        validate_email(address)?;
        if !self.test_emails.iter().any(|existing| existing == address) {
            self.test_emails.push(address.to_string());
        }
        Ok(())
    }

    pub fn set_test_emails(&mut self, emails: Vec<String>) {
        self.test_emails = emails;
    }

    pub fn test_emails(&self) -> &[String] {
        &self.test_emails
    }

    pub fn summary(&self) -> CampaignSummary {
        CampaignSummary {
            prospects: self.uploader.prospects().len(),
            test_emails: self.test_emails.len(),
        }
    }
}

impl Default for CampaignSession {
    fn default() -> Self {
        Self::new(ParseMode::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_with_prospects() -> CampaignSession {
        let mut session = CampaignSession::default();
        session
            .upload_prospects(&UploadedFile::new(
                "list.csv",
                Some("text/csv"),
                "name,email\nAlice,a@x.com",
            ))
            .unwrap();
        session
    }

    #[test]
    fn test_cannot_leave_prospect_step_without_data() {
        let mut session = CampaignSession::default();
        assert!(session.next().is_err());
        assert_eq!(session.step(), WizardStep::Prospects);
    }

    #[test]
    fn test_linear_walk_and_launch() {
        let mut session = session_with_prospects();
        assert_eq!(session.next().unwrap(), WizardStep::Content);
        assert_eq!(session.next().unwrap(), WizardStep::Media);
        assert_eq!(session.back(), WizardStep::Content);
        assert_eq!(session.next().unwrap(), WizardStep::Media);
        assert_eq!(session.next().unwrap(), WizardStep::Review);
        assert!(session.next().is_err());

        session.add_test_email("qa@example.com").unwrap();
        let summary = session.launch().unwrap();
        assert_eq!(summary, CampaignSummary { prospects: 1, test_emails: 1 });
        assert_eq!(session.step(), WizardStep::Launched);
        assert_eq!(session.back(), WizardStep::Launched);
    }

    #[test]
    fn test_launch_requires_review_step() {
        let mut session = session_with_prospects();
        assert!(session.launch().is_err());
        assert_eq!(session.back(), WizardStep::Prospects);
    }

    #[test]
    fn test_test_emails_are_validated_and_deduplicated() {
        let mut session = CampaignSession::default();
        assert_eq!(
            session.add_test_email("").unwrap_err().to_string(),
            "Please enter an email address"
        );
        assert_eq!(
            session.add_test_email("nope").unwrap_err().to_string(),
            "Please enter a valid email address"
        );

        session.add_test_email("qa@example.com").unwrap();
        session.add_test_email(" qa@example.com ").unwrap();
        assert_eq!(session.test_emails(), ["qa@example.com".to_string()]);

        session.set_test_emails(vec!["a@b.co".to_string(), "c@d.co".to_string()]);
        assert_eq!(session.test_emails().len(), 2);
    }
}
