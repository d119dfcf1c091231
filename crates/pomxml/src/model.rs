//! Typed Maven POM model (schema 4.0.0)
//!
//! Scalar fields hold raw character data exactly as written. Plugin and
//! execution `configuration` blocks keep their arbitrary shape as a [`Node`];
//! the project-level `properties` block is a [`Properties`] map.

use crate::dom::Node;
use crate::properties::Properties;
use crate::record::record;

/// Root element name of a project descriptor
pub const ROOT: &str = "project";

record! {
    /// A project descriptor, the `<project>` element
    pub struct Model {
        /// Version of the descriptor schema this document conforms to
        "modelVersion" => model_version: String,
        "parent" => parent: Option<Parent>,
        "groupId" => group_id: String,
        "artifactId" => artifact_id: String,
        "version" => version: String,
        /// `jar`, `war`, `pom`, `maven-plugin`, ...
        "packaging" => packaging: String,
        "name" => name: String,
        "description" => description: String,
        "url" => url: String,
        "inceptionYear" => inception_year: String,
        "organization" => organization: Option<Organization>,
        "licenses" => licenses: Option<Licenses>,
        "developers" => developers: Option<Developers>,
        "contributors" => contributors: Option<Contributors>,
        "mailingLists" => mailing_lists: Option<MailingLists>,
        "prerequisites" => prerequisites: Option<Prerequisites>,
        "modules" => modules: Option<Modules>,
        "scm" => scm: Option<Scm>,
        "issueManagement" => issue_management: Option<IssueManagement>,
        "ciManagement" => ci_management: Option<CiManagement>,
        "distributionManagement" => distribution_management: Option<DistributionManagement>,
        "properties" => properties: Option<Properties>,
        "dependencyManagement" => dependency_management: Option<DependencyManagement>,
        "dependencies" => dependencies: Option<Dependencies>,
        "repositories" => repositories: Option<Repositories>,
        "pluginRepositories" => plugin_repositories: Option<Repositories>,
        "build" => build: Option<Build>,
        /// Ignored by current Maven releases
        "reports" => reports: Option<Reports>,
        "reporting" => reporting: Option<Reporting>,
        "profiles" => profiles: Option<Profiles>,
    }
}

impl Model {
    /// `groupId:artifactId:version`, inheriting groupId and version from the
    /// parent when the project leaves them out
    pub fn coordinates(&self) -> String {
        let parent = self.parent.as_ref();
        let group_id = match (self.group_id.trim(), parent) {
            ("", Some(parent)) => parent.group_id.trim(),
            (group_id, _) => group_id,
        };
        let version = match (self.version.trim(), parent) {
            ("", Some(parent)) => parent.version.trim(),
            (version, _) => version,
        };
        format!("{group_id}:{}:{version}", self.artifact_id.trim())
    }

    /// Look up a project-level property
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.as_ref()?.get(key)
    }

    /// Direct dependencies, empty when the section is absent
    pub fn dependencies(&self) -> &[Dependency] {
        self.dependencies
            .as_ref()
            .map(|deps| deps.dependency.as_slice())
            .unwrap_or_default()
    }

    /// Build plugins, empty when the section is absent
    pub fn plugins(&self) -> &[Plugin] {
        self.build
            .as_ref()
            .and_then(|build| build.plugins.as_ref())
            .map(|plugins| plugins.plugin.as_slice())
            .unwrap_or_default()
    }
}

record! {
    /// The parent project, located by its coordinates
    pub struct Parent {
        "groupId" => group_id: String,
        "artifactId" => artifact_id: String,
        "version" => version: String,
        "relativePath" => relative_path: String,
    }
}

record! {
    pub struct Organization {
        "name" => name: String,
        "url" => url: String,
    }
}

record! {
    pub struct Licenses {
        "license" => license: Vec<License>,
    }
}

record! {
    pub struct License {
        "name" => name: String,
        "url" => url: String,
        /// `repo` or `manual`
        "distribution" => distribution: String,
        "comments" => comments: String,
    }
}

record! {
    pub struct Developers {
        "developer" => developer: Vec<Developer>,
    }
}

record! {
    pub struct Contributors {
        "contributor" => contributor: Vec<Contributor>,
    }
}

record! {
    /// A committer of the project
    pub struct Developer {
        "id" => id: String,
        "name" => name: String,
        "email" => email: String,
        "url" => url: String,
        "organization" => organization: String,
        "organizationUrl" => organization_url: String,
        "roles" => roles: Option<Roles>,
        "timezone" => timezone: String,
        "properties" => properties: Option<Node>,
    }
}

/// Contributors carry the same fields as developers
pub type Contributor = Developer;

record! {
    pub struct Roles {
        "role" => role: Vec<String>,
    }
}

record! {
    pub struct MailingLists {
        "mailingList" => mailing_list: Vec<MailingList>,
    }
}

record! {
    pub struct MailingList {
        "name" => name: String,
        "subscribe" => subscribe: String,
        "unsubscribe" => unsubscribe: String,
        "post" => post: String,
        "archive" => archive: String,
        "otherArchives" => other_archives: Option<OtherArchives>,
    }
}

record! {
    pub struct OtherArchives {
        "otherArchive" => other_archive: Vec<String>,
    }
}

record! {
    pub struct Prerequisites {
        /// Minimum Maven version needed to use a plugin project
        "maven" => maven: String,
    }
}

record! {
    /// Subprojects built as part of this one, as relative paths
    pub struct Modules {
        "module" => module: Vec<String>,
    }
}

record! {
    pub struct Scm {
        /// Read-only connection URL
        "connection" => connection: String,
        "developerConnection" => developer_connection: String,
        "tag" => tag: String,
        "url" => url: String,
    }
}

record! {
    pub struct IssueManagement {
        "system" => system: String,
        "url" => url: String,
    }
}

record! {
    pub struct CiManagement {
        "system" => system: String,
        "url" => url: String,
        "notifiers" => notifiers: Option<Notifiers>,
    }
}

record! {
    pub struct Notifiers {
        "notifier" => notifier: Vec<Notifier>,
    }
}

record! {
    pub struct Notifier {
        "type" => kind: String,
        "sendOnError" => send_on_error: bool,
        "sendOnFailure" => send_on_failure: bool,
        "sendOnSuccess" => send_on_success: bool,
        "sendOnWarning" => send_on_warning: bool,
        "address" => address: String,
        "configuration" => configuration: Option<Node>,
    }
}

record! {
    pub struct DistributionManagement {
        "repository" => repository: Option<DeploymentRepository>,
        "snapshotRepository" => snapshot_repository: Option<DeploymentRepository>,
        "site" => site: Option<Site>,
        "downloadUrl" => download_url: String,
        "relocation" => relocation: Option<Relocation>,
        "status" => status: String,
    }
}

record! {
    pub struct DeploymentRepository {
        "uniqueVersion" => unique_version: bool,
        "releases" => releases: Option<RepositoryPolicy>,
        "snapshots" => snapshots: Option<RepositoryPolicy>,
        "id" => id: String,
        "name" => name: String,
        "url" => url: String,
        "layout" => layout: String,
    }
}

record! {
    pub struct Site {
        "id" => id: String,
        "name" => name: String,
        "url" => url: String,
    }
}

record! {
    /// New coordinates of an artifact that has moved
    pub struct Relocation {
        "groupId" => group_id: String,
        "artifactId" => artifact_id: String,
        "version" => version: String,
        "message" => message: String,
    }
}

record! {
    pub struct DependencyManagement {
        "dependencies" => dependencies: Option<Dependencies>,
    }
}

record! {
    pub struct Dependencies {
        "dependency" => dependency: Vec<Dependency>,
    }
}

record! {
    pub struct Dependency {
        "groupId" => group_id: String,
        "artifactId" => artifact_id: String,
        "version" => version: String,
        "type" => kind: String,
        "classifier" => classifier: String,
        "scope" => scope: String,
        "systemPath" => system_path: String,
        "exclusions" => exclusions: Option<Exclusions>,
        "optional" => optional: String,
    }
}

impl Dependency {
    /// `groupId:artifactId`
    pub fn key(&self) -> String {
        format!("{}:{}", self.group_id.trim(), self.artifact_id.trim())
    }
}

record! {
    pub struct Exclusions {
        "exclusion" => exclusion: Vec<Exclusion>,
    }
}

record! {
    pub struct Exclusion {
        "artifactId" => artifact_id: String,
        "groupId" => group_id: String,
    }
}

record! {
    /// Holds both `<repositories>` and `<pluginRepositories>`
    pub struct Repositories {
        "repository" => repository: Vec<Repository>,
        "pluginRepository" => plugin_repository: Vec<Repository>,
    }
}

record! {
    pub struct Repository {
        "releases" => releases: Option<RepositoryPolicy>,
        "snapshots" => snapshots: Option<RepositoryPolicy>,
        "id" => id: String,
        "name" => name: String,
        "url" => url: String,
        "layout" => layout: String,
    }
}

record! {
    /// Download policy
    pub struct RepositoryPolicy {
        "enabled" => enabled: String,
        /// `always`, `daily`, `interval:N` or `never`
        "updatePolicy" => update_policy: String,
        "checksumPolicy" => checksum_policy: String,
    }
}

record! {
    /// Build settings of the project itself
    pub struct Build {
        "sourceDirectory" => source_directory: String,
        "scriptSourceDirectory" => script_source_directory: String,
        "testSourceDirectory" => test_source_directory: String,
        "outputDirectory" => output_directory: String,
        "testOutputDirectory" => test_output_directory: String,
        "extensions" => extensions: Option<Extensions>,
        "defaultGoal" => default_goal: String,
        "resources" => resources: Option<Resources>,
        "testResources" => test_resources: Option<Resources>,
        "directory" => directory: String,
        "finalName" => final_name: String,
        "filters" => filters: Option<Filters>,
        "pluginManagement" => plugin_management: Option<PluginManagement>,
        "plugins" => plugins: Option<Plugins>,
    }
}

record! {
    /// Build settings a profile may override
    pub struct BuildBase {
        "defaultGoal" => default_goal: String,
        "resources" => resources: Option<Resources>,
        "testResources" => test_resources: Option<Resources>,
        "directory" => directory: String,
        "finalName" => final_name: String,
        "filters" => filters: Option<Filters>,
        "pluginManagement" => plugin_management: Option<PluginManagement>,
        "plugins" => plugins: Option<Plugins>,
    }
}

record! {
    /// Holds both `<resources>` and `<testResources>`
    pub struct Resources {
        "resource" => resource: Vec<Resource>,
        "testResource" => test_resource: Vec<Resource>,
    }
}

record! {
    pub struct Resource {
        /// Relative to `target/classes`
        "targetPath" => target_path: String,
        "filtering" => filtering: String,
        "directory" => directory: String,
        "includes" => includes: Option<Includes>,
        "excludes" => excludes: Option<Excludes>,
    }
}

record! {
    pub struct Includes {
        "include" => include: Vec<String>,
    }
}

record! {
    pub struct Excludes {
        "exclude" => exclude: Vec<String>,
    }
}

record! {
    pub struct Filters {
        "filter" => filter: Vec<String>,
    }
}

record! {
    pub struct Extensions {
        "extension" => extension: Vec<Extension>,
    }
}

record! {
    pub struct Extension {
        "groupId" => group_id: String,
        "artifactId" => artifact_id: String,
        "version" => version: String,
    }
}

record! {
    pub struct PluginManagement {
        "plugins" => plugins: Option<Plugins>,
    }
}

record! {
    pub struct Plugins {
        "plugin" => plugin: Vec<Plugin>,
    }
}

record! {
    pub struct Plugin {
        "groupId" => group_id: String,
        "artifactId" => artifact_id: String,
        "version" => version: String,
        "extensions" => extensions: bool,
        "executions" => executions: Option<Executions>,
        "dependencies" => dependencies: Option<Dependencies>,
        /// Deprecated in favour of goals on each execution
        "goals" => goals: Option<Goals>,
        "inherited" => inherited: String,
        "configuration" => configuration: Option<Node>,
    }
}

impl Plugin {
    /// Text of `configuration/<path...>`
    pub fn config_value(&self, path: &[&str]) -> Option<&str> {
        self.configuration
            .as_ref()?
            .find(path)
            .map(|node| node.text.as_str())
    }
}

record! {
    pub struct Executions {
        "execution" => execution: Vec<Execution>,
    }
}

record! {
    pub struct Execution {
        "id" => id: String,
        "phase" => phase: String,
        "goals" => goals: Option<Goals>,
        "inherited" => inherited: String,
        "configuration" => configuration: Option<Node>,
    }
}

record! {
    pub struct Goals {
        "goal" => goal: Vec<String>,
    }
}

record! {
    pub struct Reports {
        "report" => report: Vec<String>,
    }
}

record! {
    /// Report plugins run by `mvn site`
    pub struct Reporting {
        "excludeDefaults" => exclude_defaults: String,
        "outputDirectory" => output_directory: String,
        "plugins" => plugins: Option<ReportPlugins>,
    }
}

record! {
    pub struct ReportPlugins {
        "plugin" => plugin: Vec<ReportPlugin>,
    }
}

record! {
    pub struct ReportPlugin {
        "groupId" => group_id: String,
        "artifactId" => artifact_id: String,
        "version" => version: String,
        /// Each set may carry its own configuration
        "reportSets" => report_sets: Option<ReportSets>,
        "inherited" => inherited: String,
        "configuration" => configuration: Option<Node>,
    }
}

record! {
    pub struct ReportSets {
        "reportSet" => report_set: Vec<ReportSet>,
    }
}

record! {
    pub struct ReportSet {
        "id" => id: String,
        "reports" => reports: Option<Reports>,
        "inherited" => inherited: String,
        "configuration" => configuration: Option<Node>,
    }
}

record! {
    pub struct Profiles {
        "profile" => profile: Vec<Profile>,
    }
}

record! {
    /// Build modifications activated by environment or command line
    pub struct Profile {
        "id" => id: String,
        "activation" => activation: Option<Activation>,
        "build" => build: Option<BuildBase>,
        "modules" => modules: Option<Modules>,
        "distributionManagement" => distribution_management: Option<DistributionManagement>,
        "properties" => properties: Option<Node>,
        "dependencyManagement" => dependency_management: Option<DependencyManagement>,
        "dependencies" => dependencies: Option<Dependencies>,
        "repositories" => repositories: Option<Repositories>,
        "pluginRepositories" => plugin_repositories: Option<Repositories>,
        "reports" => reports: Option<Reports>,
        "reporting" => reporting: Option<Reporting>,
    }
}

record! {
    pub struct Activation {
        "activeByDefault" => active_by_default: bool,
        "jdk" => jdk: String,
        "os" => os: Option<ActivationOs>,
        "property" => property: Option<ActivationProperty>,
        "file" => file: Option<ActivationFile>,
    }
}

record! {
    pub struct ActivationProperty {
        "name" => name: String,
        "value" => value: String,
    }
}

record! {
    pub struct ActivationOs {
        "name" => name: String,
        "family" => family: String,
        "arch" => arch: String,
        "version" => version: String,
    }
}

record! {
    pub struct ActivationFile {
        /// File whose absence activates the profile
        "missing" => missing: String,
        /// File whose presence activates the profile
        "exists" => exists: String,
    }
}
