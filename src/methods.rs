//! Catalog of fixed step size methods.
//!
//! Every method is a process-wide immutable value, validated when the crate is compiled.

use crate::{
    integrator::{FixedStepSizeIntegrator, FixedStepSizeKind},
    multistep::SymmetricLinearMultistep,
    runge_kutta::SymplecticRungeKuttaNystrom,
};

pub static BLANES_MOAN_2002_SRKN_6B: SymplecticRungeKuttaNystrom = SymplecticRungeKuttaNystrom::new(
    FixedStepSizeKind::BlanesMoan2002Srkn6B,
    4,
    true,
    &[
        0.245298957184271,
        0.60487266571108,
        -0.350171622895351,
        -0.350171622895351,
        0.60487266571108,
        0.245298957184271,
        0.0,
    ],
    &[
        0.0829844064174052,
        0.396309801498368,
        -0.0390563049223486,
        0.1195241940131508,
        -0.0390563049223486,
        0.396309801498368,
        0.0829844064174052,
    ],
);

pub static BLANES_MOAN_2002_SRKN_11B: SymplecticRungeKuttaNystrom =
    SymplecticRungeKuttaNystrom::new(
        FixedStepSizeKind::BlanesMoan2002Srkn11B,
        6,
        true,
        &[
            0.123229775946271,
            0.290553797799558,
            -0.127049212625417,
            -0.246331761062075,
            0.357208872795928,
            0.20477705429147,
            0.357208872795928,
            -0.246331761062075,
            -0.127049212625417,
            0.290553797799558,
            0.123229775946271,
            0.0,
        ],
        &[
            0.0414649985182624,
            0.198128671918067,
            -0.0400061921041533,
            0.0752539843015807,
            -0.0115113874206879,
            0.2366699247869311,
            0.2366699247869311,
            -0.0115113874206879,
            0.0752539843015807,
            -0.0400061921041533,
            0.198128671918067,
            0.0414649985182624,
        ],
    );

pub static BLANES_MOAN_2002_SRKN_14A: SymplecticRungeKuttaNystrom =
    SymplecticRungeKuttaNystrom::new(
        FixedStepSizeKind::BlanesMoan2002Srkn14A,
        6,
        true,
        &[
            0.0378593198406116,
            0.102635633102435,
            -0.0258678882665587,
            0.314241403071447,
            -0.130144459517415,
            0.106417700369543,
            -0.00879424312851058,
            0.2073050690568954,
            -0.00879424312851058,
            0.106417700369543,
            -0.130144459517415,
            0.314241403071447,
            -0.0258678882665587,
            0.102635633102435,
            0.0378593198406116,
        ],
        &[
            0.0,
            0.09171915262446165,
            0.183983170005006,
            -0.05653436583288827,
            0.004914688774712854,
            0.143761127168358,
            0.328567693746804,
            -0.19641146648645422,
            -0.19641146648645422,
            0.328567693746804,
            0.143761127168358,
            0.004914688774712854,
            -0.05653436583288827,
            0.183983170005006,
            0.09171915262446165,
        ],
    );

pub static FOREST_RUTH_1990: SymplecticRungeKuttaNystrom = SymplecticRungeKuttaNystrom::new(
    FixedStepSizeKind::ForestRuth1990,
    4,
    true,
    &[
        0.6756035959798288,
        -0.17560359597982883,
        -0.17560359597982883,
        0.6756035959798288,
    ],
    &[
        0.0,
        1.3512071919596575,
        -1.7024143839193153,
        1.3512071919596575,
    ],
);

pub static MCLACHLAN_ORDER_4: SymplecticRungeKuttaNystrom = SymplecticRungeKuttaNystrom::new(
    FixedStepSizeKind::McLachlanOrder4,
    4,
    false,
    &[
        0.5153528374311229,
        -0.08578201941297364,
        0.4415830236164665,
        0.12884615836538418,
    ],
    &[
        0.1344961992774311,
        -0.22481980307942082,
        0.7563200005156683,
        0.33400360328632145,
    ],
);

pub static MCLACHLAN_1995_SS17: SymplecticRungeKuttaNystrom = SymplecticRungeKuttaNystrom::new(
    FixedStepSizeKind::McLachlan1995SS17,
    8,
    true,
    &[
        0.06443298969072164,
        0.35519003324334714,
        0.08566935781770041,
        -0.1125142178766312,
        -0.11220270385213184,
        -0.13257320117041968,
        0.21137072073684585,
        0.2966460921549873,
        -0.15601907074441956,
        -0.15601907074441956,
        0.2966460921549873,
        0.21137072073684585,
        -0.13257320117041968,
        -0.11220270385213184,
        -0.1125142178766312,
        0.08566935781770041,
        0.35519003324334714,
        0.06443298969072164,
    ],
    &[
        0.0,
        0.12886597938144329,
        0.581514087105251,
        -0.4101753714698501,
        0.18514693571658775,
        -0.4095523434208514,
        0.14440594108001203,
        0.27833550039367966,
        0.31495668391629483,
        -0.626994825405134,
        0.31495668391629483,
        0.27833550039367966,
        0.14440594108001203,
        -0.4095523434208514,
        0.18514693571658775,
        -0.4101753714698501,
        0.581514087105251,
        0.12886597938144329,
    ],
);

const PEFRL_XI: f64 = 0.1786178958448091;
const PEFRL_CHI: f64 = -0.0662645826698185;
const PEFRL_LAMBDA: f64 = -0.2123418310626054;
const PEFRL_A: &[f64] = &[
    PEFRL_XI,
    PEFRL_CHI,
    1.0 - 2.0 * (PEFRL_CHI + PEFRL_XI),
    PEFRL_CHI,
    PEFRL_XI,
];
const PEFRL_B: &[f64] = &[
    0.0,
    0.5 - PEFRL_LAMBDA,
    PEFRL_LAMBDA,
    PEFRL_LAMBDA,
    0.5 - PEFRL_LAMBDA,
];

pub static OMELYAN_MRYGLOD_FOLK_2002_PEFRL: SymplecticRungeKuttaNystrom =
    SymplecticRungeKuttaNystrom::new(
        FixedStepSizeKind::OmelyanMryglodFolk2002Pefrl,
        4,
        true,
        PEFRL_A,
        PEFRL_B,
    );

const RUTH_A: &[f64] = &[2.0 / 3.0, -2.0 / 3.0, 1.0];
const RUTH_B: &[f64] = &[7.0 / 24.0, 3.0 / 4.0, -1.0 / 24.0];

pub static RUTH_1983: SymplecticRungeKuttaNystrom = SymplecticRungeKuttaNystrom::new(
    FixedStepSizeKind::Ruth1983,
    3,
    false,
    RUTH_A,
    RUTH_B,
);

pub static QUINLAN_1999_ORDER_8A: SymmetricLinearMultistep = SymmetricLinearMultistep::new(
    FixedStepSizeKind::Quinlan1999Order8A,
    FixedStepSizeIntegrator::SymplecticRungeKuttaNystrom(&BLANES_MOAN_2002_SRKN_14A),
    &[1.0, -2.0, 2.0, -2.0, 2.0],
    &[0.0, 22081.0, -29418.0, 75183.0, -75212.0],
    15120.0,
);

pub static QUINLAN_1999_ORDER_8B: SymmetricLinearMultistep = SymmetricLinearMultistep::new(
    FixedStepSizeKind::Quinlan1999Order8B,
    FixedStepSizeIntegrator::SymplecticRungeKuttaNystrom(&BLANES_MOAN_2002_SRKN_14A),
    &[1.0, 0.0, 0.0, -0.5, -1.0],
    &[0.0, 192481.0, 6582.0, 816783.0, -156812.0],
    120960.0,
);

pub static QUINLAN_TREMAINE_1990_ORDER_8: SymmetricLinearMultistep = SymmetricLinearMultistep::new(
    FixedStepSizeKind::QuinlanTremaine1990Order8,
    FixedStepSizeIntegrator::SymplecticRungeKuttaNystrom(&BLANES_MOAN_2002_SRKN_14A),
    &[1.0, -2.0, 2.0, -1.0, 0.0],
    &[0.0, 17671.0, -23622.0, 61449.0, -50516.0],
    12096.0,
);

pub static QUINLAN_TREMAINE_1990_ORDER_10: SymmetricLinearMultistep =
    SymmetricLinearMultistep::new(
        FixedStepSizeKind::QuinlanTremaine1990Order10,
        FixedStepSizeIntegrator::SymplecticRungeKuttaNystrom(&BLANES_MOAN_2002_SRKN_14A),
        &[1.0, -1.0, 1.0, -1.0, 1.0, -2.0],
        &[0.0, 399187.0, -485156.0, 2391436.0, -2816732.0, 4651330.0],
        241920.0,
    );

pub static QUINLAN_TREMAINE_1990_ORDER_12: SymmetricLinearMultistep =
    SymmetricLinearMultistep::new(
        FixedStepSizeKind::QuinlanTremaine1990Order12,
        FixedStepSizeIntegrator::SymplecticRungeKuttaNystrom(&BLANES_MOAN_2002_SRKN_14A),
        &[1.0, -2.0, 2.0, -1.0, 0.0, 0.0, 0.0],
        &[
            0.0,
            90987349.0,
            -229596838.0,
            812627169.0,
            -1628539944.0,
            2714971338.0,
            -3041896548.0,
        ],
        53222400.0,
    );

pub static QUINLAN_TREMAINE_1990_ORDER_14: SymmetricLinearMultistep =
    SymmetricLinearMultistep::new(
        FixedStepSizeKind::QuinlanTremaine1990Order14,
        FixedStepSizeIntegrator::SymplecticRungeKuttaNystrom(&BLANES_MOAN_2002_SRKN_14A),
        &[1.0, -2.0, 2.0, -1.0, 0.0, 0.0, 0.0, 0.0],
        &[
            0.0,
            433489274083.0,
            -1364031998256.0,
            5583113380398.0,
            -14154444148720.0,
            28630585332045.0,
            -42056933842656.0,
            48471792742212.0,
        ],
        237758976000.0,
    );
