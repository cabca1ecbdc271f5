//! Storage keys and helpers for the governance committee

use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::types::Proposal;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Committee actor set (instance storage)
    Actors,
    /// Governance weight token address (instance storage)
    WeightToken,
    /// Voting period in seconds for new proposals (instance storage)
    VotingPeriod,
    /// Number of proposals created so far (instance storage)
    ProposalCount,
    /// Proposal record by id (persistent storage)
    Proposal(u64),
    /// Vote marker per proposal and actor (persistent storage)
    Voted(u64, Address),
}

pub fn has_actors(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Actors)
}

pub fn get_actors(env: &Env) -> Option<Vec<Address>> {
    env.storage().instance().get(&DataKey::Actors)
}

pub fn set_actors(env: &Env, actors: &Vec<Address>) {
    env.storage().instance().set(&DataKey::Actors, actors);
}

pub fn get_weight_token(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::WeightToken)
}

pub fn set_weight_token(env: &Env, token: &Address) {
    env.storage().instance().set(&DataKey::WeightToken, token);
}

pub fn get_voting_period(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::VotingPeriod)
        .unwrap_or(crate::DEFAULT_VOTING_PERIOD)
}

pub fn set_voting_period(env: &Env, period: u64) {
    env.storage().instance().set(&DataKey::VotingPeriod, &period);
}

pub fn get_proposal_count(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::ProposalCount)
        .unwrap_or(0)
}

pub fn set_proposal_count(env: &Env, count: u64) {
    env.storage().instance().set(&DataKey::ProposalCount, &count);
}

pub fn get_proposal(env: &Env, id: u64) -> Option<Proposal> {
    env.storage().persistent().get(&DataKey::Proposal(id))
}

pub fn set_proposal(env: &Env, proposal: &Proposal) {
    env.storage()
        .persistent()
        .set(&DataKey::Proposal(proposal.id), proposal);
}

pub fn has_voted(env: &Env, id: u64, actor: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::Voted(id, actor.clone()))
        .unwrap_or(false)
}

pub fn set_voted(env: &Env, id: u64, actor: &Address) {
    env.storage()
        .persistent()
        .set(&DataKey::Voted(id, actor.clone()), &true);
}
