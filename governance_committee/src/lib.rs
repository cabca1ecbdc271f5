#![no_std]

//! # Governance Committee
//!
//! A fixed four-actor committee that deliberates on IC protocol changes by
//! simple proposal-and-vote. Proposals resolve deterministically from the
//! tally alone: a three-vote majority passes or fails, a full two-two split
//! ties, and anything unresolved past its deadline can be marked expired by
//! anyone.
//!
//! ## Features
//! - Exactly four pairwise-distinct actors fixed at initialization
//! - Voting weight gated by a governance token balance: actors must hold a
//!   nonzero balance to propose or vote
//! - Per-committee voting period, adjustable within bounds, applied only to
//!   proposals created afterwards
//! - Outcome partitions for off-chain dashboards
//!
//! ## Security
//! - Terminal outcomes are permanent; no vote or expiry call can reopen them
//! - One vote per actor per proposal
//! - Resolution happens inline with the vote that crosses a majority, so the
//!   recorded outcome never lags the tally

use soroban_sdk::{contract, contractclient, contractevent, contractimpl, Address, Env, String, Vec};

mod error;
mod storage;
mod types;

pub use error::CommitteeError;
pub use types::{Proposal, ProposalOutcome};

/// Number of committee actors.
pub const COMMITTEE_SIZE: u32 = 4;
/// Votes on one side needed to resolve a proposal.
pub const MAJORITY: u32 = 3;

/// Voting period applied until the committee changes it: seven days.
pub const DEFAULT_VOTING_PERIOD: u64 = 604_800;
/// Shortest allowed voting period: one day.
pub const MIN_VOTING_PERIOD: u64 = 86_400;
/// Longest allowed voting period: thirty days.
pub const MAX_VOTING_PERIOD: u64 = 2_592_000;

/// Balance lookup on the governance weight token.
#[contractclient(name = "WeightTokenClient")]
pub trait WeightToken {
    fn balance_of(env: Env, account: Address) -> i128;
}

// ============================================================================
// Events
// ============================================================================

#[contractevent(topics = ["IcCommittee", "INIT"])]
pub struct CommitteeInitialized {
    pub weight_token: Address,
    pub voting_period: u64,
}

#[contractevent(topics = ["IcCommittee", "PROPOSED"])]
pub struct ProposalCreated {
    pub proposal_id: u64,
    pub proposer: Address,
    pub voting_deadline: u64,
}

#[contractevent(topics = ["IcCommittee", "VOTED"])]
pub struct VoteCast {
    pub proposal_id: u64,
    pub voter: Address,
    pub support: bool,
    pub for_votes: u32,
    pub against_votes: u32,
}

#[contractevent(topics = ["IcCommittee", "RESOLVED"])]
pub struct ProposalResolved {
    pub proposal_id: u64,
    pub outcome: ProposalOutcome,
}

#[contractevent(topics = ["IcCommittee", "PERIOD_UPD"])]
pub struct VotingPeriodUpdated {
    pub old: u64,
    pub new: u64,
    pub updated_by: Address,
}

// ============================================================================
// Contract Implementation
// ============================================================================

#[contract]
pub struct GovernanceCommittee;

#[contractimpl]
impl GovernanceCommittee {
    /// Initialize the committee with its four actors and the weight token.
    ///
    /// The actor set is fixed for the lifetime of the contract. The voting
    /// period starts at [`DEFAULT_VOTING_PERIOD`].
    pub fn initialize(
        env: Env,
        actors: Vec<Address>,
        weight_token: Address,
    ) -> Result<(), CommitteeError> {
        if storage::has_actors(&env) {
            return Err(CommitteeError::AlreadyInitialized);
        }

        if actors.len() != COMMITTEE_SIZE {
            return Err(CommitteeError::InvalidActorSet);
        }
        for i in 0..actors.len() {
            for j in (i + 1)..actors.len() {
                if actors.get_unchecked(i) == actors.get_unchecked(j) {
                    return Err(CommitteeError::InvalidActorSet);
                }
            }
        }

        storage::set_actors(&env, &actors);
        storage::set_weight_token(&env, &weight_token);
        storage::set_voting_period(&env, DEFAULT_VOTING_PERIOD);

        CommitteeInitialized {
            weight_token,
            voting_period: DEFAULT_VOTING_PERIOD,
        }
        .publish(&env);

        Ok(())
    }

    /// Create a proposal. Actor only; the proposer must hold weight tokens.
    ///
    /// Returns the new proposal's sequential id (ids start at 1).
    pub fn create_proposal(
        env: Env,
        proposer: Address,
        description: String,
    ) -> Result<u64, CommitteeError> {
        proposer.require_auth();
        Self::require_weighted_actor(&env, &proposer)?;

        if description.len() == 0 {
            return Err(CommitteeError::EmptyDescription);
        }

        let id = storage::get_proposal_count(&env) + 1;
        let now = env.ledger().timestamp();
        let voting_deadline = now + storage::get_voting_period(&env);

        let proposal = Proposal {
            id,
            proposer: proposer.clone(),
            description,
            for_votes: 0,
            against_votes: 0,
            created_at: now,
            voting_deadline,
            outcome: ProposalOutcome::Active,
            passed_at: None,
        };
        storage::set_proposal(&env, &proposal);
        storage::set_proposal_count(&env, id);

        ProposalCreated {
            proposal_id: id,
            proposer,
            voting_deadline,
        }
        .publish(&env);

        Ok(id)
    }

    /// Cast a vote. Actor only, once per proposal, before the deadline.
    ///
    /// The vote that crosses a majority resolves the proposal in the same
    /// call: three in favor passes, three against fails, and a full
    /// two-two split ties.
    pub fn vote(
        env: Env,
        voter: Address,
        proposal_id: u64,
        support: bool,
    ) -> Result<(), CommitteeError> {
        voter.require_auth();
        Self::require_weighted_actor(&env, &voter)?;

        let mut proposal =
            storage::get_proposal(&env, proposal_id).ok_or(CommitteeError::InvalidProposalId)?;

        if proposal.outcome != ProposalOutcome::Active {
            return Err(CommitteeError::ProposalTerminal);
        }
        let now = env.ledger().timestamp();
        if now > proposal.voting_deadline {
            return Err(CommitteeError::VotingPeriodEnded);
        }
        if storage::has_voted(&env, proposal_id, &voter) {
            return Err(CommitteeError::AlreadyVoted);
        }

        if support {
            proposal.for_votes += 1;
        } else {
            proposal.against_votes += 1;
        }
        storage::set_voted(&env, proposal_id, &voter);

        VoteCast {
            proposal_id,
            voter,
            support,
            for_votes: proposal.for_votes,
            against_votes: proposal.against_votes,
        }
        .publish(&env);

        if proposal.for_votes >= MAJORITY {
            proposal.outcome = ProposalOutcome::Passed;
            proposal.passed_at = Some(now);
        } else if proposal.against_votes >= MAJORITY {
            proposal.outcome = ProposalOutcome::Failed;
        } else if proposal.for_votes + proposal.against_votes == COMMITTEE_SIZE {
            proposal.outcome = ProposalOutcome::Tied;
        }

        if proposal.outcome != ProposalOutcome::Active {
            ProposalResolved {
                proposal_id,
                outcome: proposal.outcome,
            }
            .publish(&env);
        }

        storage::set_proposal(&env, &proposal);

        Ok(())
    }

    /// Mark an unresolved proposal past its deadline as expired. Open to
    /// anyone.
    pub fn expire_proposal(env: Env, proposal_id: u64) -> Result<(), CommitteeError> {
        let mut proposal =
            storage::get_proposal(&env, proposal_id).ok_or(CommitteeError::InvalidProposalId)?;

        if proposal.outcome != ProposalOutcome::Active {
            return Err(CommitteeError::ProposalTerminal);
        }
        if env.ledger().timestamp() <= proposal.voting_deadline {
            return Err(CommitteeError::VotingPeriodNotEnded);
        }

        proposal.outcome = ProposalOutcome::Expired;
        storage::set_proposal(&env, &proposal);

        ProposalResolved {
            proposal_id,
            outcome: ProposalOutcome::Expired,
        }
        .publish(&env);

        Ok(())
    }

    /// Change the voting period for proposals created after this call.
    /// Actor only; bounds are one to thirty days.
    pub fn update_voting_period(
        env: Env,
        actor: Address,
        new_period: u64,
    ) -> Result<(), CommitteeError> {
        actor.require_auth();
        Self::require_actor(&env, &actor)?;

        if !(MIN_VOTING_PERIOD..=MAX_VOTING_PERIOD).contains(&new_period) {
            return Err(CommitteeError::VotingPeriodOutOfBounds);
        }

        let old = storage::get_voting_period(&env);
        storage::set_voting_period(&env, new_period);

        VotingPeriodUpdated {
            old,
            new: new_period,
            updated_by: actor,
        }
        .publish(&env);

        Ok(())
    }

    // ========================================================================
    // Query Functions
    // ========================================================================

    pub fn get_proposal(env: Env, proposal_id: u64) -> Result<Proposal, CommitteeError> {
        storage::get_proposal(&env, proposal_id).ok_or(CommitteeError::InvalidProposalId)
    }

    pub fn has_voted(env: Env, proposal_id: u64, actor: Address) -> bool {
        storage::has_voted(&env, proposal_id, &actor)
    }

    pub fn get_actors(env: Env) -> Result<Vec<Address>, CommitteeError> {
        storage::get_actors(&env).ok_or(CommitteeError::NotInitialized)
    }

    pub fn get_voting_period(env: Env) -> u64 {
        storage::get_voting_period(&env)
    }

    pub fn get_proposal_count(env: Env) -> u64 {
        storage::get_proposal_count(&env)
    }

    pub fn get_active_proposals(env: Env) -> Vec<Proposal> {
        Self::proposals_with_outcome(&env, ProposalOutcome::Active)
    }

    pub fn get_passed_proposals(env: Env) -> Vec<Proposal> {
        Self::proposals_with_outcome(&env, ProposalOutcome::Passed)
    }

    pub fn get_failed_proposals(env: Env) -> Vec<Proposal> {
        Self::proposals_with_outcome(&env, ProposalOutcome::Failed)
    }

    pub fn get_tied_proposals(env: Env) -> Vec<Proposal> {
        Self::proposals_with_outcome(&env, ProposalOutcome::Tied)
    }

    pub fn get_expired_proposals(env: Env) -> Vec<Proposal> {
        Self::proposals_with_outcome(&env, ProposalOutcome::Expired)
    }

    // ========================================================================
    // Internal Helpers
    // ========================================================================

    fn require_actor(env: &Env, account: &Address) -> Result<(), CommitteeError> {
        let actors = storage::get_actors(env).ok_or(CommitteeError::NotInitialized)?;
        if !actors.contains(account) {
            return Err(CommitteeError::NotAnActor);
        }
        Ok(())
    }

    /// Actor check plus the weight-token balance gate used by proposal
    /// creation and voting.
    fn require_weighted_actor(env: &Env, account: &Address) -> Result<(), CommitteeError> {
        Self::require_actor(env, account)?;

        let token = storage::get_weight_token(env).ok_or(CommitteeError::NotInitialized)?;
        let balance = WeightTokenClient::new(env, &token).balance_of(account);
        if balance <= 0 {
            return Err(CommitteeError::NoGovernanceTokens);
        }
        Ok(())
    }

    /// Linear scan over all proposals. The committee creates proposals at
    /// human scale, so n stays small.
    fn proposals_with_outcome(env: &Env, outcome: ProposalOutcome) -> Vec<Proposal> {
        let count = storage::get_proposal_count(env);
        let mut out = Vec::new(env);
        for id in 1..=count {
            if let Some(p) = storage::get_proposal(env, id) {
                if p.outcome == outcome {
                    out.push_back(p);
                }
            }
        }
        out
    }
}
