use std::collections::HashMap;

use sqlx::PgPool;
use tracing::{info, instrument, warn};

use skillswap_config::EmailConfig;
use skillswap_core::AppError;
use skillswap_models::{
    CreateSwapRequestDto, SwapRequest, SwapRequestId, SwapRequestView, SwapStatus,
    TransitionError, UpdateSwapStatusDto, UserCard, UserId, UserProjection, UserRef,
};

use crate::metrics::{track_swap_request_created, track_swap_request_transitioned};
use crate::modules::users::service::UserService;
use crate::utils::email::{EmailService, MatchNotice};

const REQUEST_COLUMNS: &str =
    "id, from_user_id, to_user_id, message, status, created_at, updated_at";

/// Which side of the ledger a listing reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Received,
    Sent,
}

impl Direction {
    fn owner_column(self) -> &'static str {
        match self {
            Self::Received => "to_user_id",
            Self::Sent => "from_user_id",
        }
    }

    fn counterpart(self, request: &SwapRequest) -> UserId {
        match self {
            Self::Received => request.from_user_id,
            Self::Sent => request.to_user_id,
        }
    }

    fn projection(self) -> UserProjection {
        match self {
            Self::Received => UserProjection::RECEIVED_SENDER,
            Self::Sent => UserProjection::SENT_RECIPIENT,
        }
    }
}

fn project_or_id(card: Option<&UserCard>, id: UserId, projection: UserProjection) -> UserRef {
    card.map(|c| UserRef::Summary(c.project(projection)))
        .unwrap_or(UserRef::Id(id))
}

pub struct SwapRequestService;

impl SwapRequestService {
    #[instrument(skip(db, dto), fields(db.operation = "INSERT", db.table = "swap_requests", from = %from))]
    pub async fn create(
        db: &PgPool,
        from: UserId,
        dto: CreateSwapRequestDto,
    ) -> Result<SwapRequestView, AppError> {
        let to = UserId::parse(&dto.to_user_id)
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))?;

        if to == from {
            return Err(AppError::self_request());
        }

        let recipient = UserService::find_card(db, to)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))?;

        let already_sent: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM swap_requests WHERE from_user_id = $1 AND to_user_id = $2)",
        )
        .bind(from)
        .bind(to)
        .fetch_one(db)
        .await?;

        if already_sent {
            return Err(AppError::duplicate_request());
        }

        let request = sqlx::query_as::<_, SwapRequest>(&format!(
            r#"
            INSERT INTO swap_requests (from_user_id, to_user_id, message)
            VALUES ($1, $2, $3)
            RETURNING {}
            "#,
            REQUEST_COLUMNS
        ))
        .bind(from)
        .bind(to)
        .bind(dto.message())
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::duplicate_request();
                }
                if db_err.is_foreign_key_violation() {
                    return AppError::not_found(anyhow::anyhow!("User not found"));
                }
            }
            AppError::from(e)
        })?;

        let sender = UserService::find_card(db, from).await?;

        track_swap_request_created();
        info!(request.id = %request.id, to = %to, "Swap request created");

        Ok(request.into_view(
            project_or_id(sender.as_ref(), from, UserProjection::CREATED_SENDER),
            UserRef::Summary(recipient.project(UserProjection::NAME_ONLY)),
        ))
    }

    /// Requests where `user` is the recipient or the sender, newest first.
    ///
    /// The counterpart's phone and social links are included only on
    /// accepted requests.
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "swap_requests"))]
    pub async fn list(
        db: &PgPool,
        user: UserId,
        direction: Direction,
    ) -> Result<Vec<SwapRequestView>, AppError> {
        let requests = sqlx::query_as::<_, SwapRequest>(&format!(
            "SELECT {} FROM swap_requests WHERE {} = $1 ORDER BY created_at DESC, id DESC",
            REQUEST_COLUMNS,
            direction.owner_column()
        ))
        .bind(user)
        .fetch_all(db)
        .await?;

        let mut counterpart_ids: Vec<UserId> =
            requests.iter().map(|r| direction.counterpart(r)).collect();
        counterpart_ids.sort_by_key(|id| id.into_inner());
        counterpart_ids.dedup();

        let cards = UserService::find_cards(db, &counterpart_ids).await?;

        let views = requests
            .into_iter()
            .map(|request| {
                let other = direction.counterpart(&request);
                let projection = direction
                    .projection()
                    .with_contact(request.status == SwapStatus::Accepted);
                let enriched = project_or_id(cards.get(&other), other, projection);

                match direction {
                    Direction::Received => request.into_view(enriched, UserRef::Id(user)),
                    Direction::Sent => request.into_view(UserRef::Id(user), enriched),
                }
            })
            .collect();

        Ok(views)
    }

    /// Moves a pending request to `accepted` or `rejected` on behalf of its
    /// recipient.
    ///
    /// Checks run in order: unknown request, wrong actor, bad target,
    /// already resolved. The write is conditional on the row still being
    /// pending, so of two concurrent decisions only one lands.
    #[instrument(skip(db, email_config, dto), fields(db.operation = "UPDATE", db.table = "swap_requests", actor = %actor))]
    pub async fn transition(
        db: &PgPool,
        email_config: &EmailConfig,
        request_id: &str,
        actor: UserId,
        dto: UpdateSwapStatusDto,
    ) -> Result<SwapRequestView, AppError> {
        let not_found = || AppError::not_found(anyhow::anyhow!("Swap request not found"));

        let id = SwapRequestId::parse(request_id).ok_or_else(not_found)?;

        let current = sqlx::query_as::<_, SwapRequest>(&format!(
            "SELECT {} FROM swap_requests WHERE id = $1",
            REQUEST_COLUMNS
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(not_found)?;

        if current.to_user_id != actor {
            return Err(AppError::forbidden(
                "You can only respond to requests sent to you".to_string(),
            ));
        }

        let target = dto
            .target()
            .and_then(|target| current.status.transition(target))
            .map_err(AppError::invalid_status)?;

        let updated = sqlx::query_as::<_, SwapRequest>(&format!(
            r#"
            UPDATE swap_requests
            SET status = $1, updated_at = NOW()
            WHERE id = $2 AND status = 'pending'
            RETURNING {}
            "#,
            REQUEST_COLUMNS
        ))
        .bind(target)
        .bind(id)
        .fetch_optional(db)
        .await?;

        let Some(updated) = updated else {
            let status: SwapStatus =
                sqlx::query_scalar("SELECT status FROM swap_requests WHERE id = $1")
                    .bind(id)
                    .fetch_optional(db)
                    .await?
                    .unwrap_or(target);
            warn!(request.id = %id, %status, "Lost a concurrent transition");
            return Err(AppError::invalid_status(TransitionError::AlreadyResolved(
                status,
            )));
        };

        track_swap_request_transitioned(target.as_str());
        info!(request.id = %id, status = %target, "Swap request resolved");

        let accepted = target == SwapStatus::Accepted;
        let parties = [updated.from_user_id, updated.to_user_id];
        let cards = UserService::find_cards(db, &parties).await?;

        if accepted {
            Self::notify_match(db, email_config, &updated, &cards).await;
        }

        let projection = UserProjection::NAME_ONLY.with_contact(accepted);
        let from_user = project_or_id(
            cards.get(&updated.from_user_id),
            updated.from_user_id,
            projection,
        );
        let to_user = project_or_id(
            cards.get(&updated.to_user_id),
            updated.to_user_id,
            projection,
        );

        Ok(updated.into_view(from_user, to_user))
    }

    /// Best effort: a lookup or delivery failure is logged and the committed
    /// transition stands.
    async fn notify_match(
        db: &PgPool,
        email_config: &EmailConfig,
        request: &SwapRequest,
        cards: &HashMap<UserId, UserCard>,
    ) {
        let parties = [request.from_user_id, request.to_user_id];
        let emails = match UserService::find_emails(db, &parties).await {
            Ok(emails) => emails,
            Err(e) => {
                warn!(error = %e.error, "Could not load emails for match notification");
                return;
            }
        };

        let notice = |to: UserId, counterpart: UserId| -> Option<MatchNotice> {
            Some(MatchNotice {
                to_email: emails.get(&to)?.clone(),
                to_name: cards.get(&to)?.name.clone(),
                counterpart: cards.get(&counterpart)?.clone(),
            })
        };

        let notices: Vec<MatchNotice> = [
            notice(request.from_user_id, request.to_user_id),
            notice(request.to_user_id, request.from_user_id),
        ]
        .into_iter()
        .flatten()
        .collect();

        EmailService::new(email_config.clone()).spawn_swap_accepted(notices);
    }
}
