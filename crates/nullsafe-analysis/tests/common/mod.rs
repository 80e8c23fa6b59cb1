//! Shared fixtures: a simulated project standing in for the compiler.
//!
//! A project is a list of rules. A rule's error is reported when its trigger
//! (if any) is annotated and its resolving set is not fully annotated.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use nullsafe_analysis::build::Checker;
use nullsafe_analysis::facts::{MethodRecord, MethodRegistry, ModuleInfo, UsageRecord};
use nullsafe_analysis::inject::AnnotationInjector;
use nullsafe_analysis::model::{Fix, Location, Region, ReportedError};
use nullsafe_core::errors::{BuildError, FactError, InjectionError};

pub const ANNOTATION: &str = "javax.annotation.Nullable";

pub fn method_fix(class: &str, method: &str) -> Fix {
    Fix::new(Location::method(class, method), ANNOTATION)
}

pub fn param_fix(class: &str, method: &str, index: usize) -> Fix {
    Fix::new(Location::parameter(class, method, index), ANNOTATION)
}

pub fn field_fix(class: &str, variable: &str) -> Fix {
    Fix::new(Location::field(class, [variable]), ANNOTATION)
}

/// An error in `class#member` resolved by annotating all of `fixes`.
pub fn error(class: &str, member: &str, message: &str, fixes: &[Fix]) -> ReportedError {
    ReportedError {
        kind: "DEREFERENCE".to_string(),
        message: message.to_string(),
        region: Region::new(class, member),
        offset: 0,
        path: None,
        resolving_fixes: fixes.iter().cloned().collect(),
    }
}

pub fn usage(region_class: &str, region_member: &str, used_class: &str, used_member: &str) -> UsageRecord {
    UsageRecord {
        region: Region::new(region_class, region_member),
        used_member: used_member.to_string(),
        used_class: used_class.to_string(),
        source_type: "SOURCE".to_string(),
    }
}

/// Methods declared with ids from 1 in argument order.
pub fn registry(methods: &[(&str, &str)]) -> MethodRegistry {
    MethodRegistry::from_records(
        methods
            .iter()
            .enumerate()
            .map(|(i, (class, sig))| MethodRecord::new(i as u32 + 1, *class, *sig)),
    )
}

pub fn module(methods: &[(&str, &str)], usages: Vec<UsageRecord>) -> ModuleInfo {
    let mut module = ModuleInfo::new("target", registry(methods));
    for record in usages {
        module.method_usages.push(record);
    }
    module
}

#[derive(Debug, Clone)]
pub struct Rule {
    pub error: ReportedError,
    pub trigger: Option<Location>,
}

impl Rule {
    /// Present until resolved.
    pub fn existing(error: ReportedError) -> Self {
        Self { error, trigger: None }
    }

    /// Present once `trigger` is annotated, until resolved.
    pub fn triggered_by(trigger: &Fix, error: ReportedError) -> Self {
        Self {
            error,
            trigger: Some(trigger.location.clone()),
        }
    }
}

#[derive(Debug, Default)]
pub struct SimState {
    pub rules: Vec<Rule>,
    pub annotated: BTreeSet<Location>,
    pub builds: usize,
    pub injections: usize,
    pub fail_builds: bool,
}

/// Cloning shares the state, so one project can serve as both checker and
/// injector.
#[derive(Debug, Clone, Default)]
pub struct SimProject {
    name: String,
    state: Rc<RefCell<SimState>>,
}

impl SimProject {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self::named("target", rules)
    }

    pub fn named(name: &str, rules: Vec<Rule>) -> Self {
        Self {
            name: name.to_string(),
            state: Rc::new(RefCell::new(SimState {
                rules,
                ..SimState::default()
            })),
        }
    }

    pub fn builds(&self) -> usize {
        self.state.borrow().builds
    }

    pub fn injections(&self) -> usize {
        self.state.borrow().injections
    }

    pub fn annotated(&self) -> BTreeSet<Location> {
        self.state.borrow().annotated.clone()
    }

    pub fn set_fail_builds(&self, fail: bool) {
        self.state.borrow_mut().fail_builds = fail;
    }

    /// Errors the project reports in its current state.
    pub fn errors(&self) -> Vec<ReportedError> {
        let state = self.state.borrow();
        state
            .rules
            .iter()
            .filter(|rule| {
                rule.trigger
                    .as_ref()
                    .map_or(true, |t| state.annotated.contains(t))
            })
            .filter(|rule| {
                let fixes = &rule.error.resolving_fixes;
                fixes.is_empty() || !fixes.iter().all(|f| state.annotated.contains(&f.location))
            })
            .map(|rule| rule.error.clone())
            .collect()
    }
}

impl Checker for SimProject {
    fn module_name(&self) -> &str {
        &self.name
    }

    fn build(&mut self) -> Result<bool, BuildError> {
        let mut state = self.state.borrow_mut();
        if state.fail_builds {
            return Err(BuildError::Spawn {
                command: "simulated".to_string(),
                message: "build tool missing".to_string(),
            });
        }
        state.builds += 1;
        Ok(true)
    }

    fn reported_errors(&self) -> Result<Vec<ReportedError>, FactError> {
        Ok(self.errors())
    }
}

impl AnnotationInjector for SimProject {
    fn inject(&mut self, fixes: &BTreeSet<Fix>) -> Result<(), InjectionError> {
        let mut state = self.state.borrow_mut();
        state.injections += 1;
        state
            .annotated
            .extend(fixes.iter().map(|f| f.location.clone()));
        Ok(())
    }

    fn remove(&mut self, fixes: &BTreeSet<Fix>) -> Result<(), InjectionError> {
        let mut state = self.state.borrow_mut();
        for fix in fixes {
            state.annotated.remove(&fix.location);
        }
        Ok(())
    }
}

/// A chain `c0 -> c1 -> ... -> c{len}` in class `K`: a baseline error in
/// `Caller#call()` is resolved by `c0`, and annotating `c{i}` triggers an
/// error in `K#m{i}()` resolved by `c{i+1}`.
pub struct Chain {
    pub fixes: Vec<Fix>,
    pub rules: Vec<Rule>,
    pub module: ModuleInfo,
}

pub fn chain(len: usize) -> Chain {
    let signatures: Vec<String> = (0..=len).map(|i| format!("m{i}()")).collect();
    let fixes: Vec<Fix> = signatures.iter().map(|s| method_fix("K", s)).collect();
    let mut rules = vec![Rule::existing(error(
        "Caller",
        "call()",
        "dereference of m0()",
        &fixes[..1],
    ))];
    for i in 0..len {
        rules.push(Rule::triggered_by(
            &fixes[i],
            error("K", &signatures[i], "returns result of nullable call", &fixes[i + 1..i + 2]),
        ));
    }
    let methods: Vec<(&str, &str)> = signatures.iter().map(|s| ("K", s.as_str())).collect();
    Chain {
        fixes,
        rules,
        module: module(&methods, Vec::new()),
    }
}
