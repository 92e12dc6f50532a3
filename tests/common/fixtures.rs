//! Static inputs shaped like real site reports.

/// An operations dump touching every record routine.
pub const OPERATIONS_SAMPLE: &str = r#"{
  "kyric01": [
    {"AppName": "oneapi/2023.1", "AppVersion": "undefined"},
    {"AppName": "openmpi-4.1.5", "AppVersion": ""},
    {"AppName": "R built with gcc 12", "AppVersion": "4.3"}
  ],
  "delta-cpu.ncsa.access-ci.org": [
    {"AppName": "craype-x86-milan", "AppVersion": ""},
    {"AppName": "cray-mpich", "AppVersion": "8.1.27"},
    {"AppName": "null", "AppVersion": "2.1"}
  ],
  "stampede3.tacc.access-ci.org": [
    {"AppName": "tacc-apptainer", "AppVersion": "1.3"},
    {"AppName": "Lmod", "AppVersion": "8.7"}
  ],
  "ookami.sbu.access-ci.org": [
    {"AppName": "nvidia/cuda", "AppVersion": "11.8"},
    {"AppName": "hdf5/parallel/mvapich2/", "AppVersion": "1.12"},
    {"AppName": "gcc/12.2.0.lua", "AppVersion": ""}
  ],
  "osg.access-ci.org": [
    {"AppName": " GROMACS ", "AppVersion": "2023.1"},
    {"AppName": "gromacs", "AppVersion": "2022.5"},
    {"AppVersion": "1.0"},
    7
  ]
}"#;

/// Blacklist file contents used with [`OPERATIONS_SAMPLE`].
pub const BLACKLIST_SAMPLE: &str = "# site tooling\nlmod\n\n  Xalt  \n";

/// Default-grammar listing with Lmod comments and repeated names.
pub const SPIDER_EXPANSE: &str = "\
----------------------------------------------------------------
The following is a list of the modules currently available:
----------------------------------------------------------------
  DefaultModules: DefaultModules
  cmake: cmake/3.21.4, cmake/3.24.2
    CMake is an open-source, cross-platform family of tools designed to build,
    test and package software.
  gcc: gcc/10.2.0
    The GNU Compiler Collection.
    ----
    Lmod: this module is loaded by default
  gcc: gcc/12.1.0
";

/// Darwin lists bare module names indented four spaces.
pub const SPIDER_DARWIN: &str = "\
Available Modules:
    gaussian
    matlab-r2023a
    openmpi
";

/// Delta names variants after a package seen earlier in the listing.
pub const SPIDER_DELTA: &str = "\
  default: default
  intel: intel/2023.1
    Intel compilers.
  intel-mkl: intel-mkl-2023.1
  python: python/3.11.6
";

/// Bridges-2 ships an AI container whose version field is a manifest.
pub const SPIDER_BRIDGES: &str = "\
  pytorch: pytorch/1.12
    Tensors and dynamic neural networks.
  AI: AI/pytorch_1.13.1,AI/tensorflow_2.10
    Bundled AI environments.
  tensorflow: tensorflow/2.11
";
