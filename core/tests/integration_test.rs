use registry_core::{
    Assembler, Assembly, Container, ObjectScope, Registrar, RegistrarExt, Resolver, ResolverExt,
    ServiceKey,
};
use std::sync::Arc;
use std::thread;

trait A: Send + Sync {
    fn f(&self) -> &'static str;
}

struct AImpl;
struct AImpl2;
struct AImpl3;
struct AImpl4;

impl A for AImpl {
    fn f(&self) -> &'static str {
        "AImpl"
    }
}

impl A for AImpl2 {
    fn f(&self) -> &'static str {
        "AImpl2"
    }
}

impl A for AImpl3 {
    fn f(&self) -> &'static str {
        "AImpl3"
    }
}

impl A for AImpl4 {
    fn f(&self) -> &'static str {
        "AImpl4"
    }
}

struct TwoImpls;

impl Assembly for TwoImpls {
    fn assemble(&self, registrar: &dyn Registrar) {
        registrar.register::<dyn A>(|_| Arc::new(AImpl));
        registrar.register::<dyn A>(|_| Arc::new(AImpl2));
    }
}

struct ThirdImpl;

impl Assembly for ThirdImpl {
    fn assemble(&self, registrar: &dyn Registrar) {
        registrar.register::<dyn A>(|_| Arc::new(AImpl3));
    }
}

struct FourthImpl;

impl Assembly for FourthImpl {
    fn assemble(&self, registrar: &dyn Registrar) {
        registrar.register::<dyn A>(|_| Arc::new(AImpl4));
    }
}

/// Holds whichever `A` its resolver hands out.
struct Holder {
    a: Arc<dyn A>,
}

struct HolderAssembly;

impl Assembly for HolderAssembly {
    fn assemble(&self, registrar: &dyn Registrar) {
        registrar.register::<dyn A>(|_| Arc::new(AImpl));
        registrar.register::<Holder>(|r| {
            Arc::new(Holder {
                a: r.resolve_or_abort::<dyn A>(),
            })
        });
    }
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn resolve_a(resolver: &dyn Resolver) -> &'static str {
    resolver.resolve_or_abort::<dyn A>().f()
}

#[test]
fn test_last_registration_wins_across_assembly() {
    let assembler = Assembler::new(&[&TwoImpls]);
    assert_eq!(resolve_a(assembler.resolver()), "AImpl2");
}

#[test]
fn test_child_falls_back_to_parent() {
    let parent = Assembler::new(&[&TwoImpls]);
    let child = Assembler::with_parent(&[], &parent);

    assert!(child.container().is_empty());
    assert_eq!(resolve_a(child.resolver()), "AImpl2");
}

#[test]
fn test_child_shadows_parent_without_touching_it() {
    let parent = Assembler::new(&[&TwoImpls]);
    let child = Assembler::with_parent(&[&ThirdImpl], &parent);
    assert_eq!(resolve_a(child.resolver()), "AImpl3");

    child.apply(&FourthImpl);
    assert_eq!(resolve_a(child.resolver()), "AImpl4");
    assert_eq!(resolve_a(parent.resolver()), "AImpl2");
}

#[test]
fn test_playground_scenario() {
    init_logging();
    let parent = Assembler::new(&[&TwoImpls]);
    let child = Assembler::with_parent(&[], &parent);
    assert_eq!(resolve_a(child.resolver()), "AImpl2");

    child.apply(&FourthImpl);
    assert_eq!(resolve_a(parent.resolver()), "AImpl2");
    assert_eq!(resolve_a(child.resolver()), "AImpl4");
}

#[test]
fn test_parent_factory_sees_child_override() {
    init_logging();
    let parent = Assembler::new(&[&HolderAssembly]);
    let child = Assembler::with_parent(&[&FourthImpl], &parent);

    let from_child = child.resolver().resolve::<Holder>().unwrap();
    assert_eq!(from_child.a.f(), "AImpl4");

    let from_parent = parent.resolver().resolve::<Holder>().unwrap();
    assert_eq!(from_parent.a.f(), "AImpl");
}

#[test]
fn test_parent_singleton_is_shared_by_children() {
    let parent = Container::new();
    parent.register::<dyn A>(|_| Arc::new(AImpl));
    parent.register_in_scope::<Holder>(None, ObjectScope::Container, |r| {
        Arc::new(Holder {
            a: r.resolve_or_abort::<dyn A>(),
        })
    });
    let child = Container::with_parent(&parent);
    child.register::<dyn A>(|_| Arc::new(AImpl4));

    // The cache lives in the parent's registration: first resolver builds it.
    let first = child.resolve::<Holder>().unwrap();
    let second = parent.resolve::<Holder>().unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(second.a.f(), "AImpl4");
}

#[test]
fn test_unregistered_anywhere_is_absent() {
    let parent = Assembler::new(&[]);
    let child = Assembler::with_parent(&[], &parent);
    assert!(child.resolver().resolve::<dyn A>().is_none());
}

#[test]
fn test_dynamic_apply_does_not_touch_resolved_instances() {
    let assembler = Assembler::new(&[&ThirdImpl]);
    let before = assembler.resolver().resolve::<dyn A>().unwrap();

    assembler.apply(&FourthImpl);
    let after = assembler.resolver().resolve::<dyn A>().unwrap();

    assert_eq!(before.f(), "AImpl3");
    assert_eq!(after.f(), "AImpl4");
}

#[test]
fn test_applying_twice_duplicates_registrations() {
    let assembler = Assembler::new(&[&ThirdImpl]);
    assembler.apply(&ThirdImpl);

    let registrations = assembler.container().registrations();
    assert_eq!(registrations.len(), 2);
    assert!(registrations
        .iter()
        .all(|info| info.key == ServiceKey::of::<dyn A>()));
    assert_eq!(resolve_a(assembler.resolver()), "AImpl3");
}

#[test]
fn test_synchronized_resolver_is_container() {
    let assembler = Assembler::new(&[&TwoImpls]);
    let synchronized = assembler.container().synchronize();

    assert!(synchronized.ptr_eq(assembler.container()));
    assert_eq!(resolve_a(&synchronized), "AImpl2");
}

#[test]
fn test_shared_container_across_threads() {
    let container = Container::new();
    container.register_in_scope::<dyn A>(None, ObjectScope::Container, |_| Arc::new(AImpl));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let container = container.synchronize();
            thread::spawn(move || container.resolve::<dyn A>().unwrap())
        })
        .collect();

    let first = container.resolve::<dyn A>().unwrap();
    for handle in handles {
        let resolved = handle.join().unwrap();
        assert!(Arc::ptr_eq(&first, &resolved));
    }
}

#[test]
fn test_register_while_resolving_from_other_thread() {
    init_logging();
    let container = Container::new();
    container.register::<dyn A>(|_| Arc::new(AImpl));

    let writer = {
        let container = container.clone();
        thread::spawn(move || {
            for _ in 0..100 {
                container.register::<dyn A>(|_| Arc::new(AImpl2));
            }
        })
    };

    for _ in 0..100 {
        let name = resolve_a(&container);
        assert!(name == "AImpl" || name == "AImpl2");
    }
    writer.join().unwrap();

    assert_eq!(container.len(), 101);
    assert_eq!(resolve_a(&container), "AImpl2");
}
