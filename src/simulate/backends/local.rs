//! In-process stand-in for the simulate API.
//!
//! Reproduces the demo agents' scripted conversations so the simulator
//! works without network access. Conversations are keyed by
//! `"{phone}_{agent}"` and live as long as the backend does, like the
//! hosted API's sessions.
//!
//! Keyword matching is substring-based on the lower-cased message, so
//! `"oi"` also matches inside `"noite"`. The hosted API behaves the same.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use log::debug;

use crate::core::agent::Agent;
use crate::simulate::{BackendError, SimulateBackend, SimulatePayload, SimulateReply};

const EMPTY_MESSAGE_REPLY: &str = "Envie uma mensagem para iniciar.";

/// Conversation step reported back as the state label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConversationState {
    #[default]
    Initial,
    Qualifying,
    Proposal,
    Closing,
    Completed,
}

impl ConversationState {
    pub fn as_str(self) -> &'static str {
        match self {
            ConversationState::Initial => "initial",
            ConversationState::Qualifying => "qualifying",
            ConversationState::Proposal => "proposal",
            ConversationState::Closing => "closing",
            ConversationState::Completed => "completed",
        }
    }
}

#[derive(Default)]
pub struct LocalBackend {
    sessions: Mutex<HashMap<String, ConversationState>>,
}

impl LocalBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session_id(phone: &str, agent: Agent) -> String {
        format!("{}_{}", phone, agent.id())
    }

    /// Current state of a conversation, if it has started.
    pub fn session_state(&self, phone: &str, agent: Agent) -> Option<ConversationState> {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&Self::session_id(phone, agent))
            .copied()
    }

    /// Produce the scripted reply, advancing the stored conversation state.
    pub fn respond(&self, agent: Agent, payload: &SimulatePayload) -> SimulateReply {
        let message = payload.message.trim();
        if message.is_empty() {
            return SimulateReply {
                reply: Some(EMPTY_MESSAGE_REPLY.to_string()),
                agent: Some(agent.id().to_string()),
                ..Default::default()
            };
        }

        let session_id = Self::session_id(&payload.phone, agent);
        let msg = message.to_lowercase();

        let (reply, state) = {
            let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
            let current = sessions.entry(session_id.clone()).or_default();
            let (reply, next) = match agent {
                Agent::Sdr => sdr_turn(*current, &msg),
                Agent::Ecom => ecom_turn(&msg),
                Agent::Auto => auto_turn(&msg),
                Agent::Rfm => rfm_turn(&msg),
            };
            // Only the SDR script remembers where the conversation is
            if agent == Agent::Sdr {
                *current = next;
            }
            (reply, next)
        };

        debug!("Local {} reply for {}: state={}", agent, session_id, state.as_str());

        SimulateReply {
            reply: Some(reply.to_string()),
            state: Some(state.as_str().to_string()),
            agent: Some(agent.id().to_string()),
            session_id: Some(session_id),
        }
    }
}

#[async_trait]
impl SimulateBackend for LocalBackend {
    fn name(&self) -> &str {
        "local"
    }

    async fn simulate(
        &self,
        agent: Agent,
        payload: &SimulatePayload,
    ) -> Result<SimulateReply, BackendError> {
        Ok(self.respond(agent, payload))
    }
}

fn contains_any(msg: &str, words: &[&str]) -> bool {
    words.iter().any(|w| msg.contains(w))
}

fn sdr_turn(current: ConversationState, msg: &str) -> (&'static str, ConversationState) {
    use ConversationState::*;

    match current {
        Initial if contains_any(msg, &["oi", "olá", "bom dia", "boa tarde"]) => (
            "Sou o Agent SDR. Qual é o seu objetivo principal: leads qualificados, reduzir CPL ou acelerar follow-ups?",
            Qualifying,
        ),
        Qualifying if contains_any(msg, &["preço", "valor", "custo", "investimento"]) => (
            "Posso ajudar! Qual é o tamanho do seu time e meta mensal? Assim envio a proposta certa e agendo uma call.",
            Proposal,
        ),
        Qualifying => (
            "Entendi! Vou qualificar alguns pontos: segmento, ticket médio e CRM atual. Pode me dizer?",
            Qualifying,
        ),
        Proposal => (
            "Perfeito! Vou preparar uma proposta personalizada. Qual o melhor horário para uma call de 15min esta semana?",
            Closing,
        ),
        Closing => (
            "Excelente! Agendamento confirmado. Você receberá o link da reunião e a proposta por email. Obrigado!",
            Completed,
        ),
        Initial | Completed => ("Como posso ajudar você hoje?", current),
    }
}

fn ecom_turn(msg: &str) -> (&'static str, ConversationState) {
    if msg.contains("frete") {
        (
            "Frete grátis acima de R$199. Quer ver opções de entrega para seu CEP?",
            ConversationState::Qualifying,
        )
    } else if contains_any(msg, &["pagar", "checkout", "comprar"]) {
        (
            "Enviei um link de pagamento seguro. Precisa de nota e CPF na NF?",
            ConversationState::Closing,
        )
    } else {
        (
            "Tenho ofertas em destaque hoje. Prefere ver por categoria ou por preço?",
            ConversationState::Qualifying,
        )
    }
}

fn auto_turn(msg: &str) -> (&'static str, ConversationState) {
    if contains_any(msg, &["agendar", "consulta", "marcar"]) {
        (
            "Perfeito! Tenho 10:30 e 14:00 amanhã. Qual prefere?",
            ConversationState::Qualifying,
        )
    } else if msg.contains("confirmar") {
        (
            "Confirmação realizada. Você receberá lembrete automático 24h antes.",
            ConversationState::Completed,
        )
    } else if msg.contains("pagar") {
        (
            "Segue link de pagamento. Assim que confirmado, a agenda é bloqueada para você.",
            ConversationState::Closing,
        )
    } else {
        (
            "Sou o agente de autoatendimento. Posso agendar, confirmar, remarcar e enviar pagamentos.",
            ConversationState::Initial,
        )
    }
}

fn rfm_turn(msg: &str) -> (&'static str, ConversationState) {
    if msg.contains("desconto") {
        (
            "Para clientes frequentes, tenho 10% OFF hoje. Quer aplicar no seu próximo pedido?",
            ConversationState::Closing,
        )
    } else {
        (
            "Notei que faz um tempo desde sua última compra. Posso sugerir itens com base no seu histórico?",
            ConversationState::Qualifying,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(message: &str, phone: &str) -> SimulatePayload {
        SimulatePayload {
            message: message.to_string(),
            phone: phone.to_string(),
        }
    }

    fn say(backend: &LocalBackend, agent: Agent, message: &str) -> SimulateReply {
        backend.respond(agent, &payload(message, "test_user"))
    }

    #[test]
    fn test_sdr_full_funnel() {
        let backend = LocalBackend::new();

        let r = say(&backend, Agent::Sdr, "Oi, tudo bem?");
        assert_eq!(r.state.as_deref(), Some("qualifying"));
        assert!(r.reply.unwrap().contains("Sou o Agent SDR"));

        let r = say(&backend, Agent::Sdr, "Somos uma agência");
        assert_eq!(r.state.as_deref(), Some("qualifying"));

        let r = say(&backend, Agent::Sdr, "qual o preço?");
        assert_eq!(r.state.as_deref(), Some("proposal"));
        assert!(r.reply.unwrap().to_lowercase().contains("proposta"));

        let r = say(&backend, Agent::Sdr, "10 pessoas");
        assert_eq!(r.state.as_deref(), Some("closing"));

        let r = say(&backend, Agent::Sdr, "terça às 10h");
        assert_eq!(r.state.as_deref(), Some("completed"));

        let r = say(&backend, Agent::Sdr, "valeu");
        assert_eq!(r.state.as_deref(), Some("completed"));
        assert_eq!(r.reply.as_deref(), Some("Como posso ajudar você hoje?"));
    }

    #[test]
    fn test_sdr_without_greeting_stays_initial() {
        let backend = LocalBackend::new();
        let r = say(&backend, Agent::Sdr, "preço");
        assert_eq!(r.state.as_deref(), Some("initial"));
        assert_eq!(
            backend.session_state("test_user", Agent::Sdr),
            Some(ConversationState::Initial)
        );
    }

    #[test]
    fn test_sessions_are_per_phone_and_agent() {
        let backend = LocalBackend::new();
        backend.respond(Agent::Sdr, &payload("oi", "alice"));

        assert_eq!(
            backend.session_state("alice", Agent::Sdr),
            Some(ConversationState::Qualifying)
        );
        assert_eq!(backend.session_state("bob", Agent::Sdr), None);

        let r = backend.respond(Agent::Sdr, &payload("preço", "bob"));
        assert_eq!(r.state.as_deref(), Some("initial"));
        assert_eq!(r.session_id.as_deref(), Some("bob_sdr"));
    }

    #[test]
    fn test_ecom_replies() {
        let backend = LocalBackend::new();
        let r = say(&backend, Agent::Ecom, "Frete grátis?");
        assert!(r.reply.unwrap().to_lowercase().contains("frete"));
        assert_eq!(r.state.as_deref(), Some("qualifying"));

        let r = say(&backend, Agent::Ecom, "quero comprar");
        assert_eq!(r.state.as_deref(), Some("closing"));

        let r = say(&backend, Agent::Ecom, "novidades?");
        assert_eq!(r.state.as_deref(), Some("qualifying"));
        assert!(r.reply.unwrap().contains("ofertas"));
    }

    #[test]
    fn test_auto_replies() {
        let backend = LocalBackend::new();
        let r = say(&backend, Agent::Auto, "quero agendar");
        assert!(r.reply.unwrap().contains("amanhã"));
        assert_eq!(r.state.as_deref(), Some("qualifying"));

        assert_eq!(
            say(&backend, Agent::Auto, "pode confirmar").state.as_deref(),
            Some("completed")
        );
        assert_eq!(
            say(&backend, Agent::Auto, "como pagar").state.as_deref(),
            Some("closing")
        );
        assert_eq!(
            say(&backend, Agent::Auto, "olá").state.as_deref(),
            Some("initial")
        );
    }

    #[test]
    fn test_rfm_replies() {
        let backend = LocalBackend::new();
        let r = say(&backend, Agent::Rfm, "Tem DESCONTO?");
        assert_eq!(r.state.as_deref(), Some("closing"));
        assert!(r.reply.unwrap().contains("10% OFF"));

        let r = say(&backend, Agent::Rfm, "oi");
        assert_eq!(r.state.as_deref(), Some("qualifying"));
    }

    #[test]
    fn test_stateless_agents_do_not_store_state() {
        let backend = LocalBackend::new();
        say(&backend, Agent::Ecom, "comprar");
        assert_eq!(
            backend.session_state("test_user", Agent::Ecom),
            Some(ConversationState::Initial)
        );
    }

    #[test]
    fn test_empty_message_asks_for_input() {
        let backend = LocalBackend::new();
        let r = say(&backend, Agent::Auto, "   ");
        assert_eq!(r.reply.as_deref(), Some(EMPTY_MESSAGE_REPLY));
        assert_eq!(r.state, None);
        assert_eq!(r.agent.as_deref(), Some("auto"));
        assert_eq!(backend.session_state("test_user", Agent::Auto), None);
    }

    #[test]
    fn test_trait_call_never_fails() {
        let backend = LocalBackend::new();
        let result =
            tokio_test::block_on(backend.simulate(Agent::Rfm, &payload("desconto", "demo_user")));
        assert!(result.is_ok());
        assert_eq!(backend.name(), "local");
    }
}
