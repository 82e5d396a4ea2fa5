//! Role-specific setup, dispatched on `configuration.type`

use crate::action::Action;
use crate::traits::{PlanContext, Step, StepInfo};
use setupsuite_core::config::DatabaseEngine;
use setupsuite_core::{ConfigurationBlock, ServerRole};

pub struct RoleStep;

impl Step for RoleStep {
    fn info(&self) -> StepInfo {
        StepInfo::new("role", "Role-specific services (web, database, docker, proxy, build)")
    }

    fn plan(&self, ctx: &mut PlanContext<'_>) -> Vec<Action> {
        let Some(secure) = ctx.secure() else {
            return Vec::new();
        };
        let Some(cfg) = secure.configuration.as_ref() else {
            return Vec::new();
        };
        let user = secure.ssh_user.as_str();

        match cfg.role() {
            Some(ServerRole::Web) => web(cfg, ctx),
            Some(ServerRole::Database) => database(cfg, ctx),
            Some(ServerRole::Docker) => docker(cfg, user),
            Some(ServerRole::Proxy) => proxy(cfg, ctx),
            Some(ServerRole::Build) => build(user),
            Some(ServerRole::Basic) => Vec::new(),
            None => {
                ctx.note(format!("Unknown server type: '{}'", cfg.server_type));
                Vec::new()
            }
        }
    }
}

fn enable(service: &str) -> Action {
    Action::EnableService {
        service: service.to_string(),
    }
}

fn docker_group(user: &str) -> Option<Action> {
    (!user.is_empty()).then(|| Action::AddToGroup {
        user: user.to_string(),
        group: "docker".to_string(),
    })
}

fn certificate(cfg: &ConfigurationBlock) -> Option<Action> {
    match (&cfg.domain, &cfg.email) {
        (Some(domain), Some(email)) if !domain.is_empty() && !email.is_empty() => {
            Some(Action::Certificate {
                domain: domain.clone(),
                email: email.clone(),
            })
        }
        _ => None,
    }
}

fn web(cfg: &ConfigurationBlock, ctx: &mut PlanContext<'_>) -> Vec<Action> {
    let mut actions = vec![enable("nginx")];

    match cfg.domain.as_deref().filter(|domain| !domain.is_empty()) {
        Some(domain) => actions.push(Action::NginxSite {
            domain: domain.to_string(),
        }),
        None => ctx.note("no domain set; nginx keeps its default site"),
    }
    actions.extend(certificate(cfg));
    actions
}

fn database(cfg: &ConfigurationBlock, ctx: &mut PlanContext<'_>) -> Vec<Action> {
    let mut engine = cfg.database().engine;
    if let DatabaseEngine::Other(name) = &engine {
        ctx.note(format!("unsupported db_engine '{}'; using mysql", name));
        engine = DatabaseEngine::Mysql;
    }

    let mut actions = Vec::new();
    if engine == DatabaseEngine::Mysql {
        actions.push(Action::SecureDatabase {
            engine: "mysql".to_string(),
        });
    }
    actions.push(enable(engine.service_name()));
    actions
}

fn docker(cfg: &ConfigurationBlock, user: &str) -> Vec<Action> {
    let settings = cfg.docker();
    let mut actions: Vec<Action> = docker_group(user).into_iter().collect();
    actions.push(Action::DockerDaemon {
        log_driver: settings.log_driver,
        log_max_size: settings.log_max_size,
        log_max_file: settings.log_max_file,
    });
    actions.push(enable("docker"));
    actions
}

fn proxy(cfg: &ConfigurationBlock, ctx: &mut PlanContext<'_>) -> Vec<Action> {
    let settings = cfg.proxy();
    let mut actions = vec![
        Action::NginxProxy {
            upstream: settings.upstream,
        },
        enable("nginx"),
    ];

    match certificate(cfg) {
        Some(cert) => actions.push(cert),
        None if settings.ssl => ctx.note("ssl requested but domain or email is missing"),
        None => {}
    }
    actions
}

fn build(user: &str) -> Vec<Action> {
    let mut actions: Vec<Action> = docker_group(user).into_iter().collect();
    actions.push(Action::InstallNodejs);
    actions.push(Action::PipInstall {
        package: "virtualenv".to_string(),
    });
    actions.push(enable("docker"));
    actions
}
