//! Scenario 6 (spec §8): bus parameter alias. Constraining one of three
//! electrically-connected `voltage` parameters narrows all three equally.

#[path = "support/mod.rs"]
mod support;

use faebryk_core::bus::{connect, resolve_buses, BusParameter, BusStrategy};
use faebryk_core::core::SolverConfig;
use faebryk_core::expr::{create_predicate, ExprKind, Operand};
use faebryk_core::literal::{Literal, QuantitySet};
use faebryk_core::param::Domain;
use faebryk_core::typegraph::{SlotArity, TypeGraph, TypeKind, TypeRef};
use faebryk_core::units::Unit;
use faebryk_core::{InstanceGraph, Solver};

use support::{run_to_fixpoint, tolerance};

#[test]
fn bus_alias_propagates_constraint_to_every_member() {
    let mut tg = TypeGraph::new();
    let volts = tg.add_type("Volts", TypeKind::Parameter { domain: Domain::Numbers(Unit::volt()) }).unwrap();
    let power = tg.add_type("Power", TypeKind::Interface).unwrap();
    tg.add_make_child(power, "voltage", TypeRef::Resolved(volts), SlotArity::Single).unwrap();

    let mut ig = InstanceGraph::new();
    let a = ig.instantiate_node(&tg, power, indexmap::IndexMap::new()).unwrap();
    let b = ig.instantiate_node(&tg, power, indexmap::IndexMap::new()).unwrap();
    let c = ig.instantiate_node(&tg, power, indexmap::IndexMap::new()).unwrap();
    connect(&mut ig, a, b);
    connect(&mut ig, b, c);
    resolve_buses(&mut ig, &[a, b, c], &[BusParameter::new("voltage", BusStrategy::Alias)]).unwrap();

    let voltage_of = |ig: &InstanceGraph, iface| ig.composition_child(iface, "voltage").unwrap();
    let (va, vb, vc) = (voltage_of(&ig, a), voltage_of(&ig, b), voltage_of(&ig, c));

    let graph = ig.graph_mut();
    create_predicate(
        graph,
        ExprKind::Is,
        Operand::Node(va),
        Operand::Literal(Literal::Quantity(QuantitySet::single(Unit::volt(), tolerance(3.3, 0.05)))),
        true,
    )
    .unwrap();

    let mut solver = Solver::new(ig, SolverConfig::default());
    run_to_fixpoint(&mut solver);

    let known_a = solver.inspect_get_known_supersets(va).unwrap();
    let known_b = solver.inspect_get_known_supersets(vb).unwrap();
    let known_c = solver.inspect_get_known_supersets(vc).unwrap();
    assert_eq!(known_a, known_b);
    assert_eq!(known_b, known_c);
}
