//! Shared machines for integration tests.

#![allow(dead_code)]

use composite_fsm::builder::{completion, initial, on_event, GraphBuilder, StateMachineBuilder};
use composite_fsm::core::{Action, Guard, StateGraph, StateId, Transition};
use composite_fsm::StateMachine;
use std::sync::{Arc, Mutex};

/// Records action labels in the order they ran.
#[derive(Clone, Default)]
pub struct ActionLog(Arc<Mutex<Vec<String>>>);

impl ActionLog {
    pub fn action(&self, label: &str) -> Action {
        let log = self.clone();
        let entry = label.to_string();
        Action::from_fn(label, move |_| log.push(entry.clone()))
    }

    pub fn push(&self, entry: String) {
        self.0.lock().unwrap().push(entry);
    }

    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.0.lock().unwrap())
    }
}

pub fn machine(name: &str, graph: StateGraph, initial_state: StateId) -> StateMachine {
    StateMachineBuilder::new(name)
        .graph(graph)
        .initial(initial_state)
        .build()
        .unwrap()
}

/// Off, SelfTest, Idle,
/// ServingCustomer { Authentication -> SelectingTransaction -> Transaction -> Final }
pub fn atm_graph() -> (StateGraph, StateId) {
    let mut g = GraphBuilder::new();
    let off = g.simple("Off");
    let done = g.final_state("Final");
    let idle = g.simple("Idle");
    let transaction = g.simple("Transaction");
    let selecting = g.simple("SelectingTransaction");
    let authentication = g.simple("Authentication");
    let serving = g.composite(
        "ServingCustomer",
        [authentication, selecting, transaction, done],
    );
    let self_test = g.simple("SelfTest");

    g.transition(transaction, Transition::new(Guard::always(), done).named("Final"));
    g.transition(
        selecting,
        on_event("TransactionSelected", transaction).named("TransactionSelect"),
    );
    g.transition(
        authentication,
        on_event("Authenticated", selecting).named("Authenticate"),
    );
    g.transitions(
        serving,
        [
            on_event("Canceled", idle).named("Cancel"),
            completion(idle).named("Final"),
        ],
    );
    g.initial_transition(serving, initial(authentication).named("Initialize"));
    g.transitions(
        idle,
        [
            on_event("TurnedOff", off).named("TurnOff"),
            on_event("CardInserted", serving).named("CardInsert"),
        ],
    );
    g.transition(self_test, on_event("TestedOk", idle).named("TestOk"));
    g.transition(off, on_event("TurnedOn", self_test).named("TurnOn"));
    g.root_states([off, self_test, idle, serving]);

    (g.build().unwrap(), off)
}

pub fn atm() -> StateMachine {
    let (graph, off) = atm_graph();
    machine("ATM", graph, off)
}

/// OffHook, Ringing, Connected, OnHold, PhoneDestroyed
pub fn phone_graph() -> (StateGraph, StateId) {
    let mut g = GraphBuilder::new();
    let off_hook = g.simple("OffHook");
    let ringing = g.simple("Ringing");
    let connected = g.simple("Connected");
    let on_hold = g.simple("OnHold");
    let destroyed = g.simple("PhoneDestroyed");

    g.transition(off_hook, on_event("CallDialed", ringing).named("CallDial"));
    g.transitions(
        ringing,
        [
            on_event("CallConnected", connected).named("CallConnect"),
            on_event("HungUp", off_hook).named("HangUp"),
        ],
    );
    g.transitions(
        connected,
        [
            on_event("PlacedOnHold", on_hold).named("PlaceOnHold"),
            on_event("HungUp", off_hook).named("HangUp"),
            on_event("MessageLeft", off_hook).named("LeaveMessage"),
        ],
    );
    g.transitions(
        on_hold,
        [
            on_event("PhoneHurledAgainstWall", destroyed).named("HurlPhoneAgainstWall"),
            on_event("HungUp", off_hook).named("HangUp"),
            on_event("TookOffHold", connected).named("TakeOffHold"),
        ],
    );
    g.root_states([off_hook, ringing, connected, on_hold, destroyed]);

    (g.build().unwrap(), off_hook)
}

pub fn phone() -> StateMachine {
    let (graph, off_hook) = phone_graph();
    machine("Phone", graph, off_hook)
}

/// ASimpleState -> CompositeState { InnerState1 -> InnerState2 -> FinalState } -> ASimpleState2
pub fn single_composite_graph(log: &ActionLog) -> (StateGraph, StateId) {
    let mut g = GraphBuilder::new();
    let simple_2 = g.simple("ASimpleState2");
    let done = g.final_state("FinalState");
    let inner_2 = g.simple("InnerState2");
    let inner_1 = g.simple("InnerState1");
    let composite = g.composite("CompositeState", [inner_1, inner_2, done]);
    let simple = g.simple("ASimpleState");

    g.transition(inner_2, completion(done).named("FinalAction"));
    g.transition(
        inner_1,
        on_event("ToInnerState2Event", inner_2)
            .named("ToInnerState2Action")
            .with_action(log.action("ToInnerState2Action")),
    );
    g.transition(
        composite,
        completion(simple_2)
            .named("FinalAction")
            .with_action(log.action("FinalAction")),
    );
    g.initial_transition(
        composite,
        initial(inner_1)
            .named("Initialize")
            .with_action(log.action("Initialize")),
    );
    g.transition(
        simple,
        on_event("ASimpleEvent", composite)
            .named("ASimpleAction")
            .with_action(log.action("ASimpleAction")),
    );
    for (state, name) in [
        (simple, "ASimpleState"),
        (composite, "CompositeState"),
        (inner_1, "InnerState1"),
        (inner_2, "InnerState2"),
        (simple_2, "ASimpleState2"),
    ] {
        g.on_entry(state, log.action(&format!("enter {name}")));
        g.on_exit(state, log.action(&format!("exit {name}")));
    }
    g.root_states([simple, composite, simple_2]);

    (g.build().unwrap(), simple)
}

/// ASimpleState -> CompositeState1 {
///     CompositeState2 { InnerState2_1 -> InnerState2_2 -> InnerFinalState }
///     -> InnerState1 -> FinalState
/// } -> ASimpleState2
pub fn recursive_graph() -> (StateGraph, StateId) {
    let mut g = GraphBuilder::new();
    let simple_2 = g.simple("ASimpleState2");
    let done = g.final_state("FinalState");
    let inner_1 = g.simple("InnerState1");
    let inner_done = g.final_state("InnerFinalState");
    let inner_2_2 = g.simple("InnerState2_2");
    let inner_2_1 = g.simple("InnerState2_1");
    let composite_2 = g.composite("CompositeState2", [inner_2_1, inner_2_2, inner_done]);
    let composite_1 = g.composite("CompositeState1", [inner_1, composite_2, done]);
    let simple = g.simple("ASimpleState");

    g.transition(inner_1, completion(done).named("FinalAction"));
    g.transition(inner_2_2, completion(inner_done).named("FinalAction"));
    g.transition(
        inner_2_1,
        on_event("ToInnerState2_2Event", inner_2_2).named("ToInnerState2_2Action"),
    );
    g.transition(composite_2, completion(inner_1).named("FinalAction"));
    g.initial_transition(composite_2, initial(inner_2_1).named("Initialize"));
    g.transition(composite_1, completion(simple_2).named("FinalAction"));
    g.initial_transition(composite_1, initial(composite_2).named("Initialize"));
    g.transition(simple, on_event("ASimpleEvent", composite_1).named("ASimpleAction"));
    g.root_states([simple, composite_1, simple_2]);

    (g.build().unwrap(), simple)
}

pub fn recursive() -> StateMachine {
    let (graph, simple) = recursive_graph();
    machine("RecursiveComposite", graph, simple)
}

/// CompositeState1 { InnerState1 -> InnerState2 -> FinalState } -> ASimpleState,
/// active from the start.
pub fn composite_first() -> StateMachine {
    let mut g = GraphBuilder::new();
    let done = g.final_state("FinalState");
    let inner_2 = g.simple("InnerState2");
    let inner_1 = g.simple("InnerState1");
    let simple = g.simple("ASimpleState");
    let composite = g.composite("CompositeState1", [inner_1, inner_2, done]);

    g.transition(inner_2, completion(done).named("FinalAction"));
    g.transition(
        inner_1,
        on_event("ToInnerState2Event", inner_2).named("ToInnerState2Action"),
    );
    g.transitions(
        composite,
        [
            on_event("ASimpleEvent", simple).named("ASimpleAction"),
            completion(simple).named("FinalAction"),
        ],
    );
    g.initial_transition(composite, initial(inner_1).named("Initialize"));
    g.root_states([simple, composite]);

    machine("CompositeFirst", g.build().unwrap(), composite)
}
