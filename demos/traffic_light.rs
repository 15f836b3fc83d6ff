//! Traffic Light State Machine
//!
//! This example demonstrates a simple cyclic state machine driven through
//! the message pump.
//!
//! Key concepts:
//! - Declaring state and message domains with the enum macros
//! - Fixed-next-state transitions
//! - Observing committed transitions via `subscribe_state_changed`
//!
//! Run with: cargo run --example traffic_light

use pumpstate::{message_enum, state_enum, MachineError, MessagePump, State, StateMachine};

state_enum! {
    enum TrafficLight {
        None,
        Initialising,
        Red,
        RedAmber,
        Green,
        Amber,
    }
}

message_enum! {
    enum TrafficMessage {
        Initialize,
        Ready,
        Next,
    }
}

fn main() -> Result<(), MachineError> {
    println!("=== Traffic Light State Machine ===\n");

    let pump = MessagePump::new();
    let machine = StateMachine::<TrafficLight, TrafficMessage, ()>::new(
        pump,
        TrafficLight::None,
        "traffic-light",
    );

    machine.add(
        TrafficLight::None,
        TrafficMessage::Initialize,
        TrafficLight::Initialising,
    )?;
    machine.add(
        TrafficLight::Initialising,
        TrafficMessage::Ready,
        TrafficLight::Red,
    )?;
    machine.add(TrafficLight::Red, TrafficMessage::Next, TrafficLight::RedAmber)?;
    machine.add(
        TrafficLight::RedAmber,
        TrafficMessage::Next,
        TrafficLight::Green,
    )?;
    machine.add(TrafficLight::Green, TrafficMessage::Next, TrafficLight::Amber)?;
    machine.add(TrafficLight::Amber, TrafficMessage::Next, TrafficLight::Red)?;

    machine.subscribe_state_changed(|event| {
        println!("  {} -> {}", event.old_state.name(), event.new_state.name());
    });

    println!("Starting up:");
    machine.post_message(TrafficMessage::Initialize, ())?;
    machine.post_message(TrafficMessage::Ready, ())?;

    println!("\nCycling through two full sequences:");
    for _ in 0..6 {
        machine.post_message(TrafficMessage::Next, ())?;
    }

    println!("\nFinal state: {}", machine.state().name());
    println!("\n=== Example Complete ===");
    Ok(())
}
